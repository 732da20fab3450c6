//! The seam through which an external renderer supplies resolved geometry.

use crate::hit::VisualGraph;
use crate::text::MeasureText;
use arrows_core::Graph;

/// Produces the visual graph for a snapshot. Called once per input event.
pub trait GraphLayout {
    fn visual_graph<'g>(&'g self, graph: &'g Graph) -> VisualGraph<'g>;
}

/// Circles at model positions joined by straight arrows.
pub struct StraightLayout {
    pub default_radius: f64,
    pub measure: Option<Box<dyn MeasureText>>,
}

impl StraightLayout {
    pub fn new(default_radius: f64) -> Self {
        Self {
            default_radius,
            measure: None,
        }
    }

    pub fn with_text_measure(mut self, measure: impl MeasureText + 'static) -> Self {
        self.measure = Some(Box::new(measure));
        self
    }
}

impl GraphLayout for StraightLayout {
    fn visual_graph<'g>(&'g self, graph: &'g Graph) -> VisualGraph<'g> {
        let visual = VisualGraph::straight_layout(graph, self.default_radius);
        match &self.measure {
            Some(m) => visual.with_text_measure(m.as_ref()),
            None => visual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit::Hit;
    use arrows_core::{Node, NodeId, Point};

    #[test]
    fn radius_comes_from_layout_unless_styled() {
        let mut styled = Node::new(NodeId(1), Point::new(500.0, 0.0));
        styled.style.set("radius", 80.0);
        let graph = Graph {
            nodes: vec![Node::new(NodeId(0), Point::ORIGIN), styled],
            ..Graph::default()
        };
        let layout = StraightLayout::new(30.0);
        let visual = layout.visual_graph(&graph);
        assert_eq!(visual.entity_at_point(Point::new(35.0, 0.0)), Some(Hit::NodeRing(NodeId(0))));
        assert_eq!(visual.entity_at_point(Point::new(430.0, 0.0)), Some(Hit::Node(NodeId(1))));
    }
}
