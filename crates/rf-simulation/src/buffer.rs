/// Two equally sized buffers: a readable front and a scratch back.
///
/// Only the front is ever exposed as authoritative. A step reads the front and
/// writes the back through [`DoubleBuffer::stage`], then publishes the result
/// with [`DoubleBuffer::swap`], which exchanges the two allocations without
/// copying any element.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleBuffer<T> {
    front: Vec<T>,
    back: Vec<T>,
}

impl<T: Copy> DoubleBuffer<T> {
    /// Two buffers of `len` elements, all set to `fill`.
    pub fn new(len: usize, fill: T) -> Self {
        Self {
            front: vec![fill; len],
            back: vec![fill; len],
        }
    }

    /// Number of elements in each buffer.
    pub fn len(&self) -> usize {
        self.front.len()
    }

    /// Whether the buffers hold no elements.
    pub fn is_empty(&self) -> bool {
        self.front.is_empty()
    }

    /// The authoritative buffer.
    pub fn front(&self) -> &[T] {
        &self.front
    }

    /// Mutable access to the authoritative buffer, for seeding between steps.
    pub fn front_mut(&mut self) -> &mut [T] {
        &mut self.front
    }

    /// Begin a step: copy the front into the back and lend out both.
    ///
    /// The back starts as a baseline copy, so anything the step does not touch
    /// carries over unchanged.
    pub fn stage(&mut self) -> (&[T], &mut [T]) {
        self.back.copy_from_slice(&self.front);
        (&self.front, &mut self.back)
    }

    /// Publish the back buffer as the new front.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_starts_from_front() {
        let mut buf = DoubleBuffer::new(3, 0u8);
        buf.front_mut()[1] = 7;
        let (front, back) = buf.stage();
        assert_eq!(front, back);
        back[0] = 9;
        assert_eq!(buf.front(), &[0, 7, 0]);
    }

    #[test]
    fn swap_publishes_without_copying() {
        let mut buf = DoubleBuffer::new(2, 0.0f32);
        let (_, back) = buf.stage();
        back[0] = 1.5;
        let back_ptr = back.as_ptr();
        buf.swap();
        assert_eq!(buf.front(), &[1.5, 0.0]);
        assert_eq!(buf.front().as_ptr(), back_ptr);
    }
}
