// コア型定義 - シグナル、演算、パイプライン仕様

use super::error::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 変換対象の不変な数値
///
/// 値以外の同一性を持たない。各変換ステップは新しいSignalを生成する（関数的更新）。
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Signal {
    value: f64,
}

impl Signal {
    #[inline(always)]
    pub const fn new(value: f64) -> Self {
        Self { value }
    }

    #[inline(always)]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// 値を置き換えた新しいSignalを返す
    #[inline(always)]
    pub const fn with_value(self, value: f64) -> Self {
        Self { value }
    }
}

impl From<f64> for Signal {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// 演算の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Add,
    #[serde(alias = "mul")]
    Multiply,
}

impl OperationKind {
    /// テキスト表現での名前
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Multiply => "mul",
        }
    }

    /// オペランドを付けて演算を作成
    pub const fn with_operand(self, operand: f64) -> Operation {
        match self {
            Self::Add => Operation::Add(operand),
            Self::Multiply => Operation::Multiply(operand),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Self::Add),
            "mul" | "multiply" => Ok(Self::Multiply),
            other => Err(PipelineError::unknown_operation(other)),
        }
    }
}

/// 演算種別とオペランドの組
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "operand", rename_all = "snake_case")]
pub enum Operation {
    /// 定数項を加算
    Add(#[serde(with = "crate::core::float_serde")] f64),
    /// 定数係数を乗算
    #[serde(alias = "mul")]
    Multiply(#[serde(with = "crate::core::float_serde")] f64),
}

impl Operation {
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::Add(_) => OperationKind::Add,
            Self::Multiply(_) => OperationKind::Multiply,
        }
    }

    pub const fn operand(&self) -> f64 {
        match self {
            Self::Add(operand) | Self::Multiply(operand) => *operand,
        }
    }

    /// シグナルに演算を1回適用
    #[inline(always)]
    pub fn apply(&self, signal: Signal) -> Signal {
        match *self {
            Self::Add(term) => signal.with_value(signal.value() + term),
            Self::Multiply(factor) => signal.with_value(signal.value() * factor),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.operand())
    }
}

impl FromStr for Operation {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stage = s.trim();
        let (kind, operand) = stage.split_once(':').ok_or_else(|| {
            PipelineError::malformed_stage(stage, "'種類:オペランド' の形式で指定してください")
        })?;

        let kind: OperationKind = kind.parse()?;
        let operand = operand.trim();
        let value: f64 = operand
            .parse()
            .map_err(|_| PipelineError::invalid_operand(kind.as_str(), operand))?;

        Ok(kind.with_operand(value))
    }
}

/// 順序付きの演算リスト
///
/// 先頭の要素が最も内側のステージで、リスト順に適用される。
/// 空のパイプラインは恒等変換として扱う。
/// 評価はステージごとに1段ずつ呼び出しが深くなるため、段数は`MAX_STAGES`までに制限する。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Operation>", into = "Vec<Operation>")]
pub struct PipelineSpec {
    operations: Vec<Operation>,
}

impl PipelineSpec {
    /// 1つのパイプラインに含められる最大ステージ数
    pub const MAX_STAGES: usize = 1024;

    /// 段数を検証せずに作成（外部入力には`try_new`を使う）
    pub fn new(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    /// 段数を検証して作成
    pub fn try_new(operations: Vec<Operation>) -> PipelineResult<Self> {
        let spec = Self::new(operations);
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> PipelineResult<()> {
        if self.operations.len() > Self::MAX_STAGES {
            return Err(PipelineError::too_many_stages(
                self.operations.len(),
                Self::MAX_STAGES,
            ));
        }
        Ok(())
    }

    /// 恒等変換（演算なし）
    pub fn identity() -> Self {
        Self::default()
    }

    /// 計測に使う標準パイプライン: ((v + 16) * 60) + 5
    pub fn sample() -> Self {
        Self::new(vec![
            Operation::Add(16.0),
            Operation::Multiply(60.0),
            Operation::Add(5.0),
        ])
    }

    /// 演算を末尾（最も外側）に追加
    pub fn then(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// 演算をリスト順に直接適用する（抽象化なしの参照実装）
    pub fn apply(&self, signal: Signal) -> Signal {
        self.operations
            .iter()
            .fold(signal, |acc, operation| operation.apply(acc))
    }
}

impl fmt::Display for PipelineSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stages = self
            .operations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&stages)
    }
}

impl FromStr for PipelineSpec {
    type Err = PipelineError;

    fn from_str(s: &str) -> PipelineResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::identity());
        }

        let operations = s
            .split(',')
            .map(str::parse)
            .collect::<PipelineResult<Vec<Operation>>>()?;

        Self::try_new(operations)
    }
}

impl TryFrom<Vec<Operation>> for PipelineSpec {
    type Error = PipelineError;

    fn try_from(operations: Vec<Operation>) -> PipelineResult<Self> {
        Self::try_new(operations)
    }
}

impl From<PipelineSpec> for Vec<Operation> {
    fn from(spec: PipelineSpec) -> Self {
        spec.operations
    }
}
