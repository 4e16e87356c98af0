//! 構築・評価戦略の統一インターフェース
//!
//! ハーネスは戦略ごとに`build`と`evaluate`の2操作だけを使う。

use crate::closure::ClosureChain;
use crate::core::{PipelineError, PipelineResult, PipelineSpec, PipelineStrategy, Signal, Transformer};
use crate::native;
use crate::transformer::{build_decorator_chain, TransformerChain};
use serde::{Deserialize, Serialize};
use std::fmt;

/// トレイトオブジェクトを包んでいくデコレータ（動的ディスパッチ）
pub struct DecoratorStrategy;

impl PipelineStrategy for DecoratorStrategy {
    const NAME: &'static str = "decorator";
    type Pipeline = Box<dyn Transformer>;

    fn build(spec: &PipelineSpec) -> Self::Pipeline {
        build_decorator_chain(spec)
    }

    #[inline]
    fn evaluate(pipeline: &Self::Pipeline, input: f64) -> f64 {
        pipeline.transform(Signal::new(input)).value()
    }
}

/// タグ付き列挙型チェーン（静的ディスパッチ）
pub struct TaggedStrategy;

impl PipelineStrategy for TaggedStrategy {
    const NAME: &'static str = "tagged";
    type Pipeline = TransformerChain;

    fn build(spec: &PipelineSpec) -> Self::Pipeline {
        TransformerChain::build(spec)
    }

    #[inline]
    fn evaluate(pipeline: &Self::Pipeline, input: f64) -> f64 {
        pipeline.transform(Signal::new(input)).value()
    }
}

/// 合成クロージャ
pub struct ClosureStrategy;

impl PipelineStrategy for ClosureStrategy {
    const NAME: &'static str = "closure";
    type Pipeline = ClosureChain;

    fn build(spec: &PipelineSpec) -> Self::Pipeline {
        ClosureChain::build(spec)
    }

    #[inline]
    fn evaluate(pipeline: &Self::Pipeline, input: f64) -> f64 {
        pipeline.call(Signal::new(input)).value()
    }
}

/// 演算リストを直接ループで適用する基準実装
pub struct NativeStrategy;

impl PipelineStrategy for NativeStrategy {
    const NAME: &'static str = "native";
    type Pipeline = PipelineSpec;

    fn build(spec: &PipelineSpec) -> Self::Pipeline {
        spec.clone()
    }

    #[inline]
    fn evaluate(pipeline: &Self::Pipeline, input: f64) -> f64 {
        native::evaluate(pipeline, input)
    }
}

/// 実行時に選択する戦略の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Decorator,
    Tagged,
    Closure,
    Native,
}

impl StrategyKind {
    /// 全戦略（先頭が比較の基準）
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Decorator,
        StrategyKind::Tagged,
        StrategyKind::Closure,
        StrategyKind::Native,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Decorator => DecoratorStrategy::NAME,
            Self::Tagged => TaggedStrategy::NAME,
            Self::Closure => ClosureStrategy::NAME,
            Self::Native => NativeStrategy::NAME,
        }
    }

    /// 仕様から構築して1回評価
    pub fn evaluate(&self, spec: &PipelineSpec, input: f64) -> f64 {
        match self {
            Self::Decorator => DecoratorStrategy::build_and_evaluate(spec, input),
            Self::Tagged => TaggedStrategy::build_and_evaluate(spec, input),
            Self::Closure => ClosureStrategy::build_and_evaluate(spec, input),
            Self::Native => NativeStrategy::build_and_evaluate(spec, input),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 全戦略で評価した結果を返す
pub fn evaluate_all(spec: &PipelineSpec, input: f64) -> Vec<(StrategyKind, f64)> {
    StrategyKind::ALL
        .iter()
        .map(|kind| (*kind, kind.evaluate(spec, input)))
        .collect()
}

/// 全戦略の結果がビット単位で一致することを検証し、共通の結果を返す
///
/// 段数が`PipelineSpec::MAX_STAGES`を超える仕様は評価せずにエラーを返す。
pub fn verify_consistency(spec: &PipelineSpec, input: f64) -> PipelineResult<f64> {
    spec.validate()?;
    check_consistency(&evaluate_all(spec, input))
}

/// 評価済みの結果が先頭の戦略とビット単位で一致するかを検証する
pub fn check_consistency(results: &[(StrategyKind, f64)]) -> PipelineResult<f64> {
    let Some(((_, expected), rest)) = results.split_first() else {
        return Err(PipelineError::configuration("strategy", "評価結果がありません"));
    };

    for (kind, actual) in rest {
        if actual.to_bits() != expected.to_bits() {
            return Err(PipelineError::divergence(kind.name(), *expected, *actual));
        }
    }

    Ok(*expected)
}
