// 変換戦略の抽象化トレイト

use super::types::{PipelineSpec, Signal};

#[cfg(test)]
use mockall::automock;

/// シグナルを別のシグナルへ写す変換器
///
/// デコレータ型の実装は内側の変換器へ委譲してから自身の演算を適用する。
#[cfg_attr(test, automock)]
pub trait Transformer: Send + Sync {
    fn transform(&self, signal: Signal) -> Signal;
}

/// ハーネスから見たパイプライン構築・評価戦略
///
/// 構築は検証済みの`PipelineSpec`から行うため失敗しない。
pub trait PipelineStrategy {
    /// 戦略名（レポート用）
    const NAME: &'static str;

    /// 評価可能な状態に構築済みのパイプライン
    type Pipeline;

    /// 仕様からパイプラインを構築
    fn build(spec: &PipelineSpec) -> Self::Pipeline;

    /// 構築済みパイプラインを1つの入力に適用
    fn evaluate(pipeline: &Self::Pipeline, input: f64) -> f64;

    /// 構築して1回だけ評価する（コールド実行）
    fn build_and_evaluate(spec: &PipelineSpec, input: f64) -> f64 {
        let pipeline = Self::build(spec);
        Self::evaluate(&pipeline, input)
    }
}
