use eframe::egui::{
    self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, StrokeKind, Ui, vec2,
};

use crate::graph::{GraphNode, NodeKind};
use crate::interaction::Command;
use crate::layout::Phase;
use crate::util::format_count;

use super::super::ViewModel;
use super::super::render_utils::{
    blend_color, circle_visible, draw_background, fade_color, world_to_screen,
};

const SELECTED_HALO: Color32 = Color32::from_rgb(245, 176, 65);
const LABEL_COLOR: Color32 = Color32::from_rgb(44, 62, 80);
const DASH_LENGTH: f32 = 6.0;
const DASH_GAP: f32 = 4.0;

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.viz.tick() == Some(Phase::Running) {
            ui.ctx().request_repaint();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        self.apply_viewport_request(rect);
        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        draw_background(&painter, rect, self.pan, self.zoom);

        let Some(layout) = self.viz.layout() else {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Layout released. Use \"Start layout\" to run a new one.",
                FontId::proportional(15.0),
                LABEL_COLOR,
            );
            return;
        };

        let graph = self.viz.graph();
        let positions = layout.positions();
        let screen_positions = positions
            .iter()
            .map(|world| world_to_screen(rect, self.pan, self.zoom, *world))
            .collect::<Vec<_>>();
        let screen_radii = graph
            .nodes()
            .iter()
            .map(|node| (node.size * self.zoom).max(2.0))
            .collect::<Vec<_>>();

        for edge in graph.edges() {
            let (Some(&start), Some(&end)) =
                (screen_positions.get(edge.from), screen_positions.get(edge.to))
            else {
                continue;
            };

            let emphasized = self.viz.is_emphasized(edge.from) && self.viz.is_emphasized(edge.to);
            let color = if emphasized {
                edge.color
            } else {
                fade_color(edge.color)
            };
            let stroke = Stroke::new((edge.width * self.zoom.sqrt()).clamp(0.5, 4.0), color);

            if edge.dashed {
                painter.extend(Shape::dashed_line(&[start, end], stroke, DASH_LENGTH, DASH_GAP));
            } else {
                painter.line_segment([start, end], stroke);
            }
        }

        let pointer = ui.input(|input| input.pointer.hover_pos());
        let hovered = Self::hovered_index(pointer, &screen_positions, &screen_radii);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        // Entities first so the group anchors stay on top.
        let mut draw_order = (0..graph.node_count()).collect::<Vec<_>>();
        draw_order.sort_by(|&a, &b| {
            let (a, b) = (&graph.nodes()[a], &graph.nodes()[b]);
            a.is_group()
                .cmp(&b.is_group())
                .then_with(|| a.size.total_cmp(&b.size))
        });

        for index in draw_order {
            let position = screen_positions[index];
            let radius = screen_radii[index];
            if !circle_visible(rect, position, radius * 2.0) {
                continue;
            }

            let node = &graph.nodes()[index];
            let emphasized = self.viz.is_emphasized(index);
            let selected = self.viz.selection().contains(index);
            let is_hovered = hovered == Some(index);

            match node.kind {
                NodeKind::Group(_) => {
                    Self::draw_group_node(&painter, node, position, radius, emphasized)
                }
                NodeKind::Entity(_) => {
                    Self::draw_entity_node(&painter, node, position, radius, emphasized, is_hovered)
                }
            }

            if selected {
                painter.circle_stroke(
                    position,
                    radius + 4.0,
                    Stroke::new(2.5, SELECTED_HALO),
                );
            }

            let show_label = !node.is_group()
                && (is_hovered || selected || (emphasized && self.zoom > 0.45));
            if show_label {
                painter.text(
                    position + vec2(0.0, radius + 4.0),
                    Align2::CENTER_TOP,
                    &node.label,
                    FontId::proportional(12.0),
                    if emphasized {
                        LABEL_COLOR
                    } else {
                        fade_color(LABEL_COLOR)
                    },
                );
            }
        }

        if let Some(entity) = hovered.and_then(|index| graph.nodes()[index].entity()) {
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!(
                    "{}  |  Students: {}  |  Faculty: {}",
                    entity.name,
                    format_count(u64::from(entity.students)),
                    format_count(u64::from(entity.faculty))
                ),
                FontId::proportional(13.0),
                LABEL_COLOR,
            );
        }

        let clicked = hovered
            .filter(|_| response.clicked_by(egui::PointerButton::Primary))
            .map(|index| graph.nodes()[index].id());
        if let Some(id) = clicked {
            self.send(Command::SelectNode(id));
        }
    }

    fn draw_group_node(
        painter: &egui::Painter,
        node: &GraphNode,
        position: Pos2,
        radius: f32,
        emphasized: bool,
    ) {
        let fill = if emphasized {
            node.color
        } else {
            fade_color(node.color)
        };
        let font_size = (radius * 0.4).clamp(9.0, 24.0);
        let box_rect = Rect::from_center_size(position, vec2(radius * 2.2, font_size * 2.0));

        painter.rect_filled(box_rect, 4.0, fill);
        painter.rect_stroke(
            box_rect,
            4.0,
            Stroke::new(1.5, node.border),
            StrokeKind::Outside,
        );
        painter.text(
            position,
            Align2::CENTER_CENTER,
            &node.label,
            FontId::proportional(font_size),
            Color32::WHITE,
        );
    }

    fn draw_entity_node(
        painter: &egui::Painter,
        node: &GraphNode,
        position: Pos2,
        radius: f32,
        emphasized: bool,
        hovered: bool,
    ) {
        let mut fill = node.color;
        if hovered {
            fill = blend_color(fill, node.border, 0.35);
        }
        let (fill, border) = if emphasized {
            (fill, node.border)
        } else {
            (fade_color(fill), fade_color(node.border))
        };

        painter.circle_filled(position + vec2(1.5, 2.0), radius, Color32::from_black_alpha(28));
        painter.circle_filled(position, radius, fill);
        painter.circle_stroke(position, radius, Stroke::new(2.0, border));
    }
}
