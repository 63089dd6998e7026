/// Source of block ids.
///
/// Renderers key DOM nodes (or equivalent) on the block id, so ids must be
/// unique within a session. They carry no other meaning.
pub trait IdGenerator: Send + Sync {
    fn next_id(&mut self) -> String;
}

#[derive(Default)]
pub struct UuidIdGen;

impl IdGenerator for UuidIdGen {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic counter-based ids, for tests that assert on specific
/// blocks or snapshot whole frames.
#[derive(Default)]
pub struct SequentialIdGen(u64);

impl SequentialIdGen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGen {
    fn next_id(&mut self) -> String {
        let id = self.0;
        self.0 += 1;
        id.to_string()
    }
}
