use crate::graph::{amplify::Amplify, mix::Mix, node::GraphNode};

/// Fluent combinators so cue voices read as a signal chain.
pub trait NodeExt: GraphNode + Sized {
    fn amplify<M: GraphNode>(self, modulator: M) -> Amplify<Self, M> {
        Amplify::new(self, modulator)
    }

    fn mix<B: GraphNode>(self, source: B, balance: f32) -> Mix<Self, B> {
        Mix::new(self, source, balance)
    }
}

impl<T: GraphNode> NodeExt for T {}
