//! 戦略間のパフォーマンス比較
//!
//! 3つのグループを計測してレポートを生成する:
//! - Transform: 構築済みの標準パイプラインを反復評価
//! - Create: 標準パイプラインを反復構築し、最後の1つを評価
//! - Amortized: 設定のパイプラインを1回だけ構築し、多数の入力で評価

use super::alloc_counter::{self, AllocationStats};
use crate::closure::sample_closure;
use crate::config::HarnessConfig;
use crate::core::{PipelineSpec, PipelineStrategy, Signal, Transformer};
use crate::native;
use crate::strategy::{
    ClosureStrategy, DecoratorStrategy, NativeStrategy, StrategyKind, TaggedStrategy,
};
use crate::transformer::{sample_decorator, TransformerChain};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::time::{Duration, Instant};

// Type alias for (戦略, 経過時間, 確保数, 最終結果)
type RawMeasurement = (StrategyKind, Duration, Option<AllocationStats>, f64);

/// 1戦略分の計測結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyMeasurement {
    pub strategy: StrategyKind,
    pub elapsed: Duration,
    /// 確保カウンタが無効な場合はNone
    pub allocations: Option<AllocationStats>,
    /// グループ基準（先頭の計測）に対する時間比
    #[serde(with = "crate::core::float_serde")]
    pub ratio: f64,
    #[serde(with = "crate::core::float_serde")]
    pub result: f64,
}

impl StrategyMeasurement {
    /// 1反復あたりの時間（ナノ秒）
    pub fn nanos_per_op(&self, operations: usize) -> f64 {
        if operations == 0 {
            0.0
        } else {
            self.elapsed.as_nanos() as f64 / operations as f64
        }
    }
}

/// 1グループ分の計測結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub test_name: String,
    pub operations: usize,
    pub measurements: Vec<StrategyMeasurement>,
    pub best_strategy: StrategyKind,
}

impl PerformanceMetrics {
    /// 先頭の計測を基準に比率と最速戦略を求める
    pub fn new(
        test_name: impl Into<String>,
        operations: usize,
        raw: Vec<RawMeasurement>,
    ) -> Self {
        let baseline = raw
            .first()
            .map(|(_, elapsed, _, _)| elapsed.as_secs_f64())
            .unwrap_or_default();

        let measurements: Vec<StrategyMeasurement> = raw
            .into_iter()
            .map(|(strategy, elapsed, allocations, result)| StrategyMeasurement {
                strategy,
                elapsed,
                allocations,
                ratio: if baseline > 0.0 {
                    elapsed.as_secs_f64() / baseline
                } else {
                    1.0
                },
                result,
            })
            .collect();

        let best_strategy = measurements
            .iter()
            .min_by_key(|m| m.elapsed)
            .map(|m| m.strategy)
            .unwrap_or(StrategyKind::Decorator);

        Self {
            test_name: test_name.into(),
            operations,
            measurements,
            best_strategy,
        }
    }

    pub fn get_best_time(&self) -> Duration {
        self.measurements
            .iter()
            .find(|m| m.strategy == self.best_strategy)
            .map(|m| m.elapsed)
            .unwrap_or_default()
    }

    /// 全戦略の最終結果がビット単位で一致しているか
    pub fn is_consistent(&self) -> bool {
        match self.measurements.first() {
            Some(first) => self
                .measurements
                .iter()
                .all(|m| m.result.to_bits() == first.result.to_bits()),
            None => true,
        }
    }

    pub fn measurement(&self, strategy: StrategyKind) -> Option<&StrategyMeasurement> {
        self.measurements.iter().find(|m| m.strategy == strategy)
    }
}

/// JSONレポート
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub timestamp: String,
    pub config: HarnessConfig,
    pub allocation_tracking: bool,
    pub results: Vec<PerformanceMetrics>,
}

/// パフォーマンス比較テストスイート
pub struct PerformanceComparison {
    config: HarnessConfig,
    track_allocations: bool,
    results: Vec<PerformanceMetrics>,
}

impl PerformanceComparison {
    pub fn new(config: HarnessConfig) -> Self {
        let track_allocations = alloc_counter::is_active();
        if !track_allocations {
            tracing::warn!("CountingAllocatorが未登録のため確保数は計測しません");
        }

        Self {
            config,
            track_allocations,
            results: Vec::new(),
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn results(&self) -> &[PerformanceMetrics] {
        &self.results
    }

    pub fn tracks_allocations(&self) -> bool {
        self.track_allocations
    }

    fn measure(&self, strategy: StrategyKind, f: impl FnOnce() -> f64) -> RawMeasurement {
        let ((elapsed, result), allocations) = alloc_counter::measure(|| {
            let start = Instant::now();
            let result = f();
            (start.elapsed(), result)
        });

        tracing::debug!(%strategy, ?elapsed, allocations = allocations.count, "計測完了");

        let allocations = self.track_allocations.then_some(allocations);
        (strategy, elapsed, allocations, result)
    }

    /// 構築済みパイプラインの反復評価
    pub fn benchmark_transform(&mut self) {
        let iterations = self.config.iterations;
        let input = self.config.input;
        tracing::info!(iterations, input, "Transformグループを計測します");

        let decorator = sample_decorator();
        let tagged = TransformerChain::build(&PipelineSpec::sample());
        let closure = sample_closure();

        let raw = vec![
            self.measure(StrategyKind::Decorator, || {
                let mut d = 0.0;
                for _ in 0..iterations {
                    d = decorator.transform(black_box(Signal::new(input))).value();
                }
                d
            }),
            self.measure(StrategyKind::Tagged, || {
                let mut d = 0.0;
                for _ in 0..iterations {
                    d = tagged.transform(black_box(Signal::new(input))).value();
                }
                d
            }),
            self.measure(StrategyKind::Closure, || {
                let mut d = 0.0;
                for _ in 0..iterations {
                    d = closure(black_box(Signal::new(input))).value();
                }
                d
            }),
            self.measure(StrategyKind::Native, || {
                let mut d = 0.0;
                for _ in 0..iterations {
                    d = native::sample_signal(black_box(Signal::new(input))).value();
                }
                d
            }),
        ];

        self.push_results(PerformanceMetrics::new("Transform", iterations, raw));
    }

    /// 標準パイプラインの反復構築（最後に構築したものを1回評価）
    pub fn benchmark_create(&mut self) {
        let iterations = self.config.iterations;
        let input = self.config.input;
        tracing::info!(iterations, "Createグループを計測します");

        let raw = vec![
            self.measure(StrategyKind::Decorator, || {
                let mut transformer = black_box(sample_decorator());
                for _ in 1..iterations {
                    transformer = black_box(sample_decorator());
                }
                transformer.transform(Signal::new(input)).value()
            }),
            self.measure(StrategyKind::Tagged, || {
                let build = || TransformerChain::Identity.add(16.0).multiply(60.0).add(5.0);
                let mut chain = black_box(build());
                for _ in 1..iterations {
                    chain = black_box(build());
                }
                chain.transform(Signal::new(input)).value()
            }),
            self.measure(StrategyKind::Closure, || {
                let mut func = black_box(sample_closure());
                for _ in 1..iterations {
                    func = black_box(sample_closure());
                }
                func(Signal::new(input)).value()
            }),
        ];

        self.push_results(PerformanceMetrics::new("Create", iterations, raw));
    }

    /// 設定パイプラインを1回構築し、多数の入力で評価
    pub fn benchmark_amortized(&mut self) {
        let inputs = self.config.amortized_inputs;
        tracing::info!(inputs, pipeline = %self.config.pipeline, "Amortizedグループを計測します");

        let raw = vec![
            self.measure_amortized::<DecoratorStrategy>(StrategyKind::Decorator),
            self.measure_amortized::<TaggedStrategy>(StrategyKind::Tagged),
            self.measure_amortized::<ClosureStrategy>(StrategyKind::Closure),
            self.measure_amortized::<NativeStrategy>(StrategyKind::Native),
        ];

        self.push_results(PerformanceMetrics::new("Amortized", inputs, raw));
    }

    fn measure_amortized<S: PipelineStrategy>(
        &self,
        strategy: StrategyKind,
    ) -> RawMeasurement {
        let pipeline = S::build(&self.config.pipeline);
        let inputs = self.config.amortized_inputs;
        let base = self.config.input;

        self.measure(strategy, || {
            let mut acc = 0.0;
            for i in 0..inputs {
                acc += S::evaluate(&pipeline, black_box(base + i as f64));
            }
            acc
        })
    }

    fn push_results(&mut self, metrics: PerformanceMetrics) {
        if !metrics.is_consistent() {
            tracing::error!(group = %metrics.test_name, "戦略間で結果が一致しません");
        }
        self.results.push(metrics);
    }

    /// 全体的なパフォーマンス比較実行
    pub fn run_full_comparison(&mut self) {
        println!("🚀 デコレータ vs クロージャ 比較");
        println!("{}", "=".repeat(60));

        self.benchmark_transform();
        self.benchmark_create();
        self.benchmark_amortized();

        self.print_summary();
    }

    /// 結果サマリーの表示
    pub fn print_summary(&self) {
        println!("📊 パフォーマンス比較サマリー");
        println!("   パイプライン: {}", self.config.pipeline);
        println!("{}", "=".repeat(60));

        for metrics in &self.results {
            println!("🎯 {} ({} ops)", metrics.test_name, metrics.operations);
            println!(
                "   {:<10} {:>14} {:>12} {:>7} {:>10} {:>12}",
                "Method", "Elapsed", "ns/op", "Ratio", "Allocs", "Bytes"
            );
            for m in &metrics.measurements {
                let (allocs, bytes) = match m.allocations {
                    Some(stats) => (stats.count.to_string(), stats.bytes.to_string()),
                    None => ("-".to_string(), "-".to_string()),
                };
                println!(
                    "   {:<10} {:>14} {:>12.2} {:>7.2} {:>10} {:>12}",
                    m.strategy.name(),
                    format!("{:?}", m.elapsed),
                    m.nanos_per_op(metrics.operations),
                    m.ratio,
                    allocs,
                    bytes
                );
            }
            println!(
                "   🏆 Best: {} ({:?})",
                metrics.best_strategy,
                metrics.get_best_time()
            );
            if !metrics.is_consistent() {
                println!("   ⚠️  戦略間で結果が一致していません");
            }
            println!();
        }
    }

    pub fn report(&self) -> ComparisonReport {
        ComparisonReport {
            timestamp: chrono::Utc::now().to_rfc3339(),
            config: self.config.clone(),
            allocation_tracking: self.track_allocations,
            results: self.results.clone(),
        }
    }

    /// JSON形式でのレポート出力
    pub fn export_json_report(&self, path: &std::path::Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.report())
            .context("レポートのシリアライズに失敗しました")?;
        std::fs::write(path, json)
            .with_context(|| format!("レポートを書き込めません: {}", path.display()))?;

        tracing::info!(path = %path.display(), "レポートを出力しました");
        Ok(())
    }
}

impl Default for PerformanceComparison {
    fn default() -> Self {
        Self::new(HarnessConfig::default())
    }
}
