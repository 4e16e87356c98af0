//! 数値変換パイプラインの合成方式を比較するマイクロベンチマーク
//!
//! 同じパイプライン（例: `((v + 16) * 60) + 5`）を
//! デコレータ、タグ付き列挙型、クロージャ、インライン計算で表現し、
//! 評価・構築のコストを比較する。どの方式も結果はビット単位で一致する。

pub mod benchmarks;
pub mod cli;
pub mod closure;
pub mod config;
pub mod core;
pub mod logging;
pub mod native;
pub mod strategy;
pub mod transformer;

pub use crate::config::HarnessConfig;
pub use crate::core::{Operation, OperationKind, PipelineError, PipelineSpec, Signal, Transformer};
pub use crate::strategy::{check_consistency, verify_consistency, StrategyKind};
