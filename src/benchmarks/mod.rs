//! パフォーマンス測定とベンチマークモジュール
//!
//! デコレータ・タグ付き列挙型・クロージャ・インライン計算の性能比較を提供

pub mod alloc_counter;
pub mod performance_comparison;

pub use alloc_counter::{AllocationStats, CountingAllocator};
pub use performance_comparison::{
    ComparisonReport, PerformanceComparison, PerformanceMetrics, StrategyMeasurement,
};
