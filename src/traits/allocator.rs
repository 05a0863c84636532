/// Memory hook injected into a context at creation.
///
/// The context reports every reservation it makes and returns each one
/// exactly once on teardown.
pub trait Allocator {
    /// Reserve `bytes`; returning false rejects the request
    fn acquire(&self, bytes: usize) -> bool;

    /// Give back a reservation previously granted by [`acquire`](Self::acquire)
    fn release(&self, bytes: usize);
}
