//! # yomigana
//!
//! yomiganaは、日本語テキストの形態素・音韻注釈パイプラインです。
//! 外部の語彙素解析器が出力した生トークン列から、ピッチアクセント付きの
//! アクセント句とふりがな（ルビ）注釈を合成します。
//!
//! ## 概要
//!
//! パイプラインは次の段階からなります:
//!
//! 1. **先読みトークナイザー**: 消費前の各トークンに対して例外リゾルバ
//!    を実行し、複数トークン文脈が必要な表記・発音の補正を行います。
//! 2. **形態素セグメンタ**: 品詞規則・アクセント結合規則・辞書に裏付け
//!    られた最長一致探索で、隣接トークンを言語学的に正しいまとまりに
//!    統合します。
//! 3. **アクセント句ビルダー**: 形態素をアクセント句に構成し、特殊モーラ
//!    補正込みのピッチアクセント値を句ごとに1つ計算します。
//! 4. **ふりがな生成器**: 表層形と発音を汎用アラインメントエンジンで
//!    文字単位に対応付け、漢字区間と送りがな区間に分割してルビ
//!    マークアップを出力します。
//!
//! アラインメントエンジン（[`align`]）は線形空間の分割統治で実装された
//! 汎用の大域系列アラインメントであり、ふりがな生成のほか、原稿全体と
//! 機械認識されたトランスクリプトの文字単位の差分（字幕の自動同期の
//! 基盤）にもそのまま再利用できます。
//!
//! ## 使用例
//!
//! ```
//! use yomigana::{Annotator, HashSetDictionary, RawToken};
//!
//! let dict = HashSetDictionary::default();
//! let annotator = Annotator::new(dict);
//!
//! // 語彙素解析器の出力を模した「使う」のトークン列
//! let tokens = vec![
//!     RawToken::from_csv(
//!         "使う",
//!         "動詞,一般,*,*,*,*,ツカウ,使う,使う,ツカウ,*,*,*,*,*,*,*,*,*,*,ツカウ,ツカウ,*,*,0",
//!     ),
//! ];
//!
//! let sentences = annotator.annotate(tokens);
//! let component = &sentences[0].phrases()[0].components()[0];
//! assert_eq!(
//!     component.ruby(),
//!     "<ruby>使<rt>つか</rt></ruby><ruby>う<rt></rt></ruby>"
//! );
//! assert_eq!(component.accent().mora, 0);
//! ```

/// ピッチアクセントとアクセント結合コードの文法
pub mod accent;

/// 汎用の大域系列アラインメントエンジン
pub mod align;

/// 注釈パイプラインの並列ドライバ
pub mod annotator;

/// 外部辞書サービスの境界
pub mod dictionary;

/// エラー型の定義
pub mod errors;

/// ふりがな（ルビ）生成器
pub mod furigana;

/// かな変換とモーラ計算のユーティリティ
pub mod kana;

/// アクセント句の構築
pub mod phrase;

/// 形態素セグメンタ
pub mod segmenter;

/// 文の構築
pub mod sentence;

/// 生トークンと素性配列のアダプタ
pub mod token;

/// 先読み付きトークンカーソル
pub mod tokenizer;

/// 内部ユーティリティ関数
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-exports
pub use accent::{ConnectionKind, ModificationKind, PitchAccent};
pub use align::{align, align_chars, Match};
pub use annotator::Annotator;
pub use dictionary::{Dictionary, Frequency, HashSetDictionary};
pub use errors::{Result, YomiganaError};
pub use phrase::{AccentPhrase, AccentPhraseComponent};
pub use segmenter::Morpheme;
pub use sentence::Sentence;
pub use token::RawToken;
pub use tokenizer::TokenStream;

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
