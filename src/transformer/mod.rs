//! 変換器チェーン
//!
//! 同じパイプラインを2通りの形で表現する:
//! - `decorator`: トレイトオブジェクトを内側へ包んでいくデコレータ（動的ディスパッチ）
//! - `tagged`: 演算種別をタグに持つ列挙型を単一の`match`で評価（静的ディスパッチ）

pub mod decorator;
pub mod tagged;

pub use decorator::{
    build_decorator_chain, sample_decorator, AddTransformer, IdentityTransformer,
    MultiplyTransformer,
};
pub use tagged::TransformerChain;
