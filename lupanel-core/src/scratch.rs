//! Aligned packing space for the 8-wide variable driver.
//!
//! Three blocks of `4 * sd` doubles each, where `sd` is the row count rounded
//! up to a multiple of 4. A block holds either four `sd`-row columns
//! (leading dimension `sd`) or `sd` columns of a 4-row strip (leading
//! dimension 4); the caller picks the layout per block.
//!
//! Small panels borrow a `StackScratch` living in the caller's frame; only
//! the `3 * 4 * sd` doubles handed out are initialized. Taller panels get a
//! zeroed heap allocation that is released when the `Scratch` is dropped.

use std::alloc;
use std::mem::MaybeUninit;
use std::ptr;

/// Largest row count served from the inline buffer.
pub const K_MAX_STACK: usize = 300;

/// Alignment for scratch storage (one cache line, one AVX-512 register).
const ALIGNMENT: usize = 64;

/// Number of 4-row blocks in a scratch buffer.
const BLOCKS: usize = 3;

const STACK_LEN: usize = BLOCKS * 4 * round_up4(K_MAX_STACK);

#[inline]
const fn round_up4(m: usize) -> usize {
    (m + 3) & !3
}

/// Uninitialized, aligned backing store for scratch of up to `K_MAX_STACK`
/// rows. Declare one on the stack and hand it to `Scratch::for_rows`.
#[repr(C, align(64))]
pub struct StackScratch(MaybeUninit<[f64; STACK_LEN]>);

impl StackScratch {
    #[inline]
    pub const fn new() -> Self {
        Self(MaybeUninit::uninit())
    }
}

impl Default for StackScratch {
    fn default() -> Self {
        Self::new()
    }
}

struct Heap {
    ptr: *mut f64,
    len: usize,
    layout: alloc::Layout,
}

impl Heap {
    fn zeroed(len: usize) -> Self {
        let layout = alloc::Layout::from_size_align(len.max(1) * std::mem::size_of::<f64>(), ALIGNMENT)
            .expect("Invalid layout");
        // SAFETY: layout has non-zero size.
        let ptr = unsafe { alloc::alloc_zeroed(layout) } as *mut f64;
        if ptr.is_null() {
            alloc::handle_alloc_error(layout);
        }
        Self { ptr, len, layout }
    }
}

impl Drop for Heap {
    fn drop(&mut self) {
        // SAFETY: ptr was returned by alloc_zeroed with this exact layout.
        unsafe { alloc::dealloc(self.ptr as *mut u8, self.layout) };
    }
}

enum Storage<'a> {
    Stack(&'a mut [f64]),
    Heap(Heap),
}

/// Packing buffer sized for an `m`-row panel.
pub struct Scratch<'a> {
    storage: Storage<'a>,
    sd: usize,
}

impl<'a> Scratch<'a> {
    /// Scratch for `m` rows, carved out of `stack` when `m <= K_MAX_STACK`.
    pub fn for_rows(m: usize, stack: &'a mut StackScratch) -> Self {
        let sd = round_up4(m);
        let len = BLOCKS * 4 * sd;
        let storage = if m <= K_MAX_STACK {
            let base = stack.0.as_mut_ptr() as *mut f64;
            // SAFETY: len <= STACK_LEN, so the prefix lies inside `stack`, which
            // is exclusively borrowed for 'a. It is zeroed before the slice is
            // formed, so every element handed out is initialized.
            let buf = unsafe {
                ptr::write_bytes(base, 0, len);
                std::slice::from_raw_parts_mut(base, len)
            };
            Storage::Stack(buf)
        } else {
            Storage::Heap(Heap::zeroed(len))
        };
        Self { storage, sd }
    }

    /// Row count rounded up to a multiple of 4.
    #[inline]
    pub fn sd(&self) -> usize {
        self.sd
    }

    #[inline]
    pub fn is_heap(&self) -> bool {
        matches!(self.storage, Storage::Heap(_))
    }

    /// All `3 * 4 * sd` doubles.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        let len = BLOCKS * 4 * self.sd;
        match &mut self.storage {
            Storage::Stack(buf) => &mut buf[..len],
            // SAFETY: the allocation holds `h.len` zero-initialized f64s and
            // is exclusively borrowed through `&mut self`.
            Storage::Heap(h) => unsafe { std::slice::from_raw_parts_mut(h.ptr, h.len) },
        }
    }

    /// The `k`-th 4-row block: `4 * sd` doubles, `k < 3`.
    pub fn block_mut(&mut self, k: usize) -> &mut [f64] {
        assert!(k < BLOCKS, "scratch block {k} out of range");
        let step = 4 * self.sd;
        &mut self.as_mut_slice()[k * step..(k + 1) * step]
    }
}
