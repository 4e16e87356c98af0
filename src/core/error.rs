// パイプライン構築・検証用のカスタムエラー型定義
// 評価時には失敗しない（NaN/無限大は値として伝播する）ため、構築時のエラーのみを扱う

use thiserror::Error;

/// パイプライン固有のエラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("未知の演算: {kind} (使用可能: add, mul)")]
    UnknownOperation { kind: String },

    #[error("不正なステージ定義: '{stage}' - {reason}")]
    MalformedStage { stage: String, reason: String },

    #[error("不正なオペランド: {kind} '{operand}'")]
    InvalidOperand { kind: String, operand: String },

    #[error("ステージ数が多すぎます: {stages} (上限 {max})")]
    TooManyStages { stages: usize, max: usize },

    #[error("戦略間で結果が一致しません: {strategy} = {actual}, 期待値 = {expected}")]
    Divergence {
        strategy: String,
        expected: f64,
        actual: f64,
    },

    #[error("設定エラー: {field} - {reason}")]
    Configuration { field: String, reason: String },
}

impl PipelineError {
    /// 未知の演算エラーの作成
    pub fn unknown_operation(kind: impl Into<String>) -> Self {
        Self::UnknownOperation { kind: kind.into() }
    }

    /// 不正なステージ定義エラーの作成
    pub fn malformed_stage(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedStage {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// 不正なオペランドエラーの作成
    pub fn invalid_operand(kind: impl Into<String>, operand: impl Into<String>) -> Self {
        Self::InvalidOperand {
            kind: kind.into(),
            operand: operand.into(),
        }
    }

    /// ステージ数超過エラーの作成
    pub fn too_many_stages(stages: usize, max: usize) -> Self {
        Self::TooManyStages { stages, max }
    }

    /// 戦略間の不一致エラーの作成
    pub fn divergence(strategy: impl Into<String>, expected: f64, actual: f64) -> Self {
        Self::Divergence {
            strategy: strategy.into(),
            expected,
            actual,
        }
    }

    /// 設定エラーの作成
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// パイプライン定義の誤りかどうか（ユーザー入力を修正すれば解決する）
    pub fn is_spec_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownOperation { .. }
                | Self::MalformedStage { .. }
                | Self::InvalidOperand { .. }
                | Self::TooManyStages { .. }
        )
    }
}

/// パイプライン操作の結果型
pub type PipelineResult<T> = Result<T, PipelineError>;
