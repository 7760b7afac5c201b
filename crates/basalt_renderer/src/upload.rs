//! CPU-writable, GPU-readable constant regions.
//!
//! `UploadBuffer<T>` holds N fixed-size element slots inside one uniform
//! buffer.  Each slot is padded to the device's uniform-offset alignment
//! (256 bytes on desktop hardware), so slot `i` always lives at
//! `i * aligned_stride` — the same address every frame.  The region is sized
//! at construction; the end-of-frame GPU stall guarantees no command list is
//! still reading it when the next frame's writes land.

use std::marker::PhantomData;

use bytemuck::Pod;

/// Rounds `value` up to the next multiple of `alignment` (a power of two).
#[inline]
pub fn align_up(value: u64, alignment: u64) -> u64 {
    (value + alignment - 1) & !(alignment - 1)
}

/// Byte stride between consecutive element slots.
#[inline]
pub fn aligned_stride(element_size: u64, alignment: u64) -> u64 {
    align_up(element_size, alignment)
}

/// A fixed-capacity array of aligned `T` records in GPU-visible memory.
pub struct UploadBuffer<T> {
    buffer: wgpu::Buffer,
    stride: u64,
    capacity: usize,
    _marker: PhantomData<T>,
}

impl<T: Pod> UploadBuffer<T> {
    pub fn new(device: &wgpu::Device, label: &str, capacity: usize) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = aligned_stride(std::mem::size_of::<T>() as u64, alignment);
        let capacity = capacity.max(1);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            stride,
            capacity,
            _marker: PhantomData,
        }
    }

    /// Byte offset of slot `index`.
    #[inline]
    pub fn offset(&self, index: usize) -> u64 {
        index as u64 * self.stride
    }

    #[inline]
    pub fn stride(&self) -> u64 {
        self.stride
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Size of the bound window the shader sees: one element, unpadded.
    pub fn element_size(&self) -> Option<wgpu::BufferSize> {
        wgpu::BufferSize::new(std::mem::size_of::<T>() as u64)
    }

    /// Copies one record into slot `index`.  Visible to the GPU once the
    /// next submitted command list executes.
    pub fn write(&self, queue: &wgpu::Queue, index: usize, value: &T) {
        debug_assert!(index < self.capacity, "upload slot out of range");
        queue.write_buffer(&self.buffer, self.offset(index), bytemuck::bytes_of(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALIGN: u64 = 256;

    #[test]
    fn align_up_boundaries() {
        assert_eq!(align_up(1, ALIGN), 256);
        assert_eq!(align_up(255, ALIGN), 256);
        // Exactly one alignment unit adds no padding.
        assert_eq!(align_up(256, ALIGN), 256);
        // One byte over rounds up to the next unit.
        assert_eq!(align_up(257, ALIGN), 512);
        assert_eq!(align_up(512, ALIGN), 512);
        assert_eq!(align_up(513, ALIGN), 768);
    }

    #[test]
    fn slot_offsets_are_multiples_of_the_aligned_stride() {
        for size in [1u64, 16, 80, 255, 256, 257, 432] {
            let stride = aligned_stride(size, ALIGN);
            assert_eq!(stride % ALIGN, 0);
            assert!(stride >= size);
            for i in 0..8u64 {
                assert_eq!(i * stride, i * align_up(size, ALIGN));
            }
        }
    }
}
