//! ハーネス設定
//!
//! 型レベルのプリセットとJSONファイルから計測条件を組み立てる:
//! - HarnessPreset: プリセット名・説明をコンパイル時定数で持つ
//! - HarnessConfig: 反復回数、入力値、パイプライン、償却計測の入力数

use crate::core::{PipelineError, PipelineResult, PipelineSpec};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 1グループあたりの反復回数（構築・評価とも）
pub const DEFAULT_ITERATIONS: usize = 100;

/// 計測に使う入力値
pub const DEFAULT_INPUT: f64 = 50.0;

/// 償却計測で評価する入力数
pub const DEFAULT_AMORTIZED_INPUTS: usize = 1_000;

/// 計測条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub iterations: usize,
    #[serde(with = "crate::core::float_serde")]
    pub input: f64,
    pub pipeline: PipelineSpec,
    pub amortized_inputs: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::from_preset::<DefaultPreset>()
    }
}

/// 型レベルのプリセット定義
pub trait HarnessPreset {
    /// プリセット名（コンパイル時文字列）
    const NAME: &'static str;

    /// 説明（コンパイル時文字列）
    const DESCRIPTION: &'static str;

    fn config() -> HarnessConfig;
}

/// 元の計測と同じ条件（100回、入力50）
pub struct DefaultPreset;

impl HarnessPreset for DefaultPreset {
    const NAME: &'static str = "default";
    const DESCRIPTION: &'static str = "標準条件（100回反復、入力50、標準パイプライン）";

    fn config() -> HarnessConfig {
        HarnessConfig {
            iterations: DEFAULT_ITERATIONS,
            input: DEFAULT_INPUT,
            pipeline: PipelineSpec::sample(),
            amortized_inputs: DEFAULT_AMORTIZED_INPUTS,
        }
    }
}

/// 動作確認用の軽量設定
pub struct QuickPreset;

impl HarnessPreset for QuickPreset {
    const NAME: &'static str = "quick";
    const DESCRIPTION: &'static str = "動作確認用の軽量設定";

    fn config() -> HarnessConfig {
        HarnessConfig {
            iterations: 10,
            amortized_inputs: 100,
            ..DefaultPreset::config()
        }
    }
}

/// ノイズを減らすための長時間設定
pub struct ThoroughPreset;

impl HarnessPreset for ThoroughPreset {
    const NAME: &'static str = "thorough";
    const DESCRIPTION: &'static str = "反復回数を増やした長時間計測";

    fn config() -> HarnessConfig {
        HarnessConfig {
            iterations: 100_000,
            amortized_inputs: 1_000_000,
            ..DefaultPreset::config()
        }
    }
}

impl HarnessConfig {
    pub fn from_preset<P: HarnessPreset>() -> Self {
        P::config()
    }

    /// 名前からプリセットを選択
    pub fn preset(name: &str) -> PipelineResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            n if n == DefaultPreset::NAME => Ok(Self::from_preset::<DefaultPreset>()),
            n if n == QuickPreset::NAME => Ok(Self::from_preset::<QuickPreset>()),
            n if n == ThoroughPreset::NAME => Ok(Self::from_preset::<ThoroughPreset>()),
            other => Err(PipelineError::configuration(
                "preset",
                format!("未知のプリセット '{other}'"),
            )),
        }
    }

    /// 利用可能なプリセットの一覧（名前、説明）
    pub fn presets() -> [(&'static str, &'static str); 3] {
        [
            (DefaultPreset::NAME, DefaultPreset::DESCRIPTION),
            (QuickPreset::NAME, QuickPreset::DESCRIPTION),
            (ThoroughPreset::NAME, ThoroughPreset::DESCRIPTION),
        ]
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_input(mut self, input: f64) -> Self {
        self.input = input;
        self
    }

    pub fn with_pipeline(mut self, pipeline: PipelineSpec) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn with_amortized_inputs(mut self, amortized_inputs: usize) -> Self {
        self.amortized_inputs = amortized_inputs;
        self
    }

    /// JSON文字列から読み込み（省略した項目はデフォルト値）
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("設定JSONの解析に失敗しました")?;
        config.validate()?;
        Ok(config)
    }

    /// JSONファイルから読み込み
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "設定ファイルを読み込みます");

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("設定ファイルを読み込めません: {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("設定ファイルが不正です: {}", path.display()))
    }

    pub fn validate(&self) -> PipelineResult<()> {
        if self.iterations == 0 {
            return Err(PipelineError::configuration(
                "iterations",
                "1以上を指定してください",
            ));
        }
        if self.amortized_inputs == 0 {
            return Err(PipelineError::configuration(
                "amortized_inputs",
                "1以上を指定してください",
            ));
        }
        self.pipeline.validate()
    }
}
