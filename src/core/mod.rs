// コアレイヤー - シグナル、演算、パイプライン定義とエラー型
// 各変換戦略から参照される基本的な抽象化を提供

pub mod error;
pub mod float_serde;
pub mod traits;
pub mod types;

// 公開API - 明示的にエクスポートして曖昧性を回避
pub use error::{PipelineError, PipelineResult};
pub use traits::{PipelineStrategy, Transformer};
pub use types::{Operation, OperationKind, PipelineSpec, Signal};
