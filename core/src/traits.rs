pub type StationId = u32;

/// Source of backoff draws. Implementations must return a value in `[0, window]`.
pub trait BackoffSource {
    fn draw(&mut self, window: u32) -> u32;
}
