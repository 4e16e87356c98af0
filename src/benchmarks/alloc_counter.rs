//! スレッド単位のヒープ確保カウンタ
//!
//! バイナリ側で`#[global_allocator]`として登録したときだけ値が増える:
//!
//! ```ignore
//! #[global_allocator]
//! static GLOBAL: CountingAllocator = CountingAllocator;
//! ```

use serde::{Deserialize, Serialize};
use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
    static ALLOCATED_BYTES: Cell<usize> = const { Cell::new(0) };
}

/// 確保回数とバイト数を記録してSystemアロケータへ委譲する
pub struct CountingAllocator;

#[inline]
fn record(size: usize) {
    // スレッド終了処理中はTLSにアクセスできないため記録を諦める
    let _ = ALLOCATIONS.try_with(|count| count.set(count.get() + 1));
    let _ = ALLOCATED_BYTES.try_with(|bytes| bytes.set(bytes.get() + size));
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        record(layout.size());
        System.alloc(layout)
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        record(layout.size());
        System.alloc_zeroed(layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        record(new_size);
        System.realloc(ptr, layout, new_size)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }
}

/// 確保回数とバイト数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AllocationStats {
    pub count: usize,
    pub bytes: usize,
}

impl AllocationStats {
    /// 現在のスレッドの累計値
    pub fn snapshot() -> Self {
        Self {
            count: ALLOCATIONS.with(Cell::get),
            bytes: ALLOCATED_BYTES.with(Cell::get),
        }
    }

    pub fn since(&self, earlier: &Self) -> Self {
        Self {
            count: self.count.saturating_sub(earlier.count),
            bytes: self.bytes.saturating_sub(earlier.bytes),
        }
    }

    /// 1操作あたりの確保バイト数
    pub fn bytes_per_op(&self, operations: usize) -> f64 {
        if operations == 0 {
            0.0
        } else {
            self.bytes as f64 / operations as f64
        }
    }
}

/// クロージャ実行中の確保を計測
pub fn measure<R>(f: impl FnOnce() -> R) -> (R, AllocationStats) {
    let before = AllocationStats::snapshot();
    let result = f();
    let after = AllocationStats::snapshot();
    (result, after.since(&before))
}

/// `CountingAllocator`がグローバルアロケータとして登録されているか
pub fn is_active() -> bool {
    let (_, stats) = measure(|| std::hint::black_box(Box::new(0u64)));
    stats.count > 0
}
