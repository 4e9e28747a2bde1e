use super::segment::{Anchor, SegmentId};

/// Drawable surface that receives a handle for every segment the sweep
/// creates, and is told when a segment is pruned again.
pub trait SegmentScene {
    fn attach(&mut self, id: SegmentId, start: Anchor);

    fn detach(&mut self, _id: SegmentId) {}
}

impl SegmentScene for () {
    fn attach(&mut self, _id: SegmentId, _start: Anchor) {}
}

/// Scene that only remembers which segments are currently attached.
#[derive(Clone, Debug, Default)]
pub struct RecordingScene {
    live: Vec<(SegmentId, Anchor)>,
    attached: usize,
    detached: usize,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segments attached and not detached since, in creation order.
    pub fn live(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.live.iter().map(|(id, _)| *id)
    }

    pub fn start_of(&self, id: SegmentId) -> Option<Anchor> {
        self.live.iter().find(|(live, _)| *live == id).map(|(_, a)| *a)
    }

    pub fn attached(&self) -> usize {
        self.attached
    }

    pub fn detached(&self) -> usize {
        self.detached
    }
}

impl SegmentScene for RecordingScene {
    fn attach(&mut self, id: SegmentId, start: Anchor) {
        self.attached += 1;
        self.live.push((id, start));
    }

    fn detach(&mut self, id: SegmentId) {
        if let Some(pos) = self.live.iter().position(|(live, _)| *live == id) {
            self.live.remove(pos);
            self.detached += 1;
        }
    }
}
