//! アクセント句の構築
//!
//! このモジュールは、形態素の連結列をアクセント句
//! （[`AccentPhrase`]）と表示可能な構成要素
//! （[`AccentPhraseComponent`]）にまとめ、句ごとにただ1つのピッチ
//! アクセント値を計算します。
//!
//! 形態素列は、末尾の基本語（単独表示可能な内容語）の連続と、先頭の
//! 非基本語の残りに分割されます。両方が空でなければ「複合句」として、
//! 先頭部から1つ・末尾の基本語ごとに1つの構成要素を作り、句のピッチ
//! アクセントは構成要素からではなく形態素列全体から計算します。
//! さもなくば「単純句」として列全体が1つの構成要素になり、その
//! アクセントがそのまま句のアクセントになります。

use crate::accent::PitchAccent;
use crate::dictionary::{classify_frequency, Dictionary, Frequency};
use crate::furigana::ruby_spans;
use crate::kana::{katakana_to_hiragana, mora_len};
use crate::segmenter::Morpheme;
use crate::tokenizer::TokenStream;

/// 1つ以上の形態素が統合された表示可能な構成要素
///
/// 連結済みの表層形・原形・発音・ルビマークアップ、外部辞書による
/// 頻度分類、およびモーラ補正済みのピッチアクセントをただ1つ持ちます。
#[derive(Clone, Debug)]
pub struct AccentPhraseComponent {
    surface: String,
    original: String,
    reading: String,
    pronunciation: String,
    ruby: String,
    frequency: Option<Frequency>,
    accent: PitchAccent,
    is_basic: bool,
    is_compound: bool,
}

impl AccentPhraseComponent {
    /// 形態素の連続から構成要素を構築します
    ///
    /// # 引数
    ///
    /// * `morphemes` - 統合対象の形態素列（空であってはならない）
    /// * `dict` - 頻度分類に使用する外部辞書
    fn from_morphemes<D>(morphemes: &[Morpheme], dict: &D) -> Self
    where
        D: Dictionary + ?Sized,
    {
        let surface: String = morphemes.iter().map(Morpheme::surface).collect();
        let original: String = morphemes.iter().map(Morpheme::original).collect();
        let reading: String = morphemes.iter().map(Morpheme::reading).collect();
        let pronunciation: String = morphemes
            .iter()
            .map(Morpheme::surface_pronunciation)
            .collect();
        let hide_furigana = morphemes.iter().all(Morpheme::hide_furigana);

        // 頻度は4つの候補キーの中で最も一般的な分類を採用する
        let frequency = classify_frequency(
            dict,
            &[
                &surface,
                &original,
                &katakana_to_hiragana(&reading),
                &katakana_to_hiragana(&pronunciation),
            ],
        );

        let ruby = ruby_spans(&surface, &pronunciation, hide_furigana);
        let accent = run_accent(morphemes);
        Self {
            surface,
            original,
            reading,
            pronunciation,
            ruby,
            frequency,
            accent,
            is_basic: morphemes.iter().all(Morpheme::is_basic),
            is_compound: morphemes.len() > 1,
        }
    }

    /// 構成要素の表層形を取得します
    #[inline(always)]
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// 原形（語彙素見出しの連結）を取得します
    #[inline(always)]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// 読み（カタカナ）を取得します
    #[inline(always)]
    pub fn reading(&self) -> &str {
        &self.reading
    }

    /// 表層発音（カタカナ）を取得します
    #[inline(always)]
    pub fn pronunciation(&self) -> &str {
        &self.pronunciation
    }

    /// ルビマークアップを取得します
    #[inline(always)]
    pub fn ruby(&self) -> &str {
        &self.ruby
    }

    /// 頻度分類を取得します
    #[inline(always)]
    pub fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }

    /// ピッチアクセント値を取得します
    #[inline(always)]
    pub fn accent(&self) -> PitchAccent {
        self.accent
    }

    /// 基本語（単独表示可能な内容語）のみからなるかどうか
    #[inline(always)]
    pub fn is_basic(&self) -> bool {
        self.is_basic
    }

    /// 複数の形態素が統合された複合要素かどうか
    #[inline(always)]
    pub fn is_compound(&self) -> bool {
        self.is_compound
    }
}

/// 1つ以上の構成要素からなるアクセント句
///
/// 非基本語の先頭部と基本語の末尾部を持つ「複合句」と、単一の構成
/// 要素からなる「単純句」があります。いずれの場合も代表のピッチ
/// アクセント値をただ1つ持ちます。
#[derive(Clone, Debug)]
pub struct AccentPhrase {
    components: Vec<AccentPhraseComponent>,
    accent: PitchAccent,
    is_complex: bool,
}

impl AccentPhrase {
    /// トークンカーソルから1つのアクセント句を解析します
    ///
    /// 形態素セグメンタで形態素の連結列を取得し、末尾の基本語の連続と
    /// 先頭の残りに分割します。両方が空でなければ複合句として構成
    /// 要素を作り、句のアクセントは形態素列全体から計算します。
    /// 形態素が得られなければ `None` を返します。
    ///
    /// # 引数
    ///
    /// * `stream` - 消費対象のトークンカーソル
    /// * `dict` - 最長一致探索と頻度分類に使用する外部辞書
    pub fn parse<D>(stream: &mut TokenStream, dict: &D) -> Option<Self>
    where
        D: Dictionary + ?Sized,
    {
        let morphemes = Morpheme::parse_multiple(stream, dict);
        if morphemes.is_empty() {
            return None;
        }

        // 末尾の基本語の連続の開始位置
        let suffix_start = morphemes
            .iter()
            .rposition(|m| !m.is_basic())
            .map_or(0, |i| i + 1);
        let (prefix, suffix) = morphemes.split_at(suffix_start);

        if !prefix.is_empty() && !suffix.is_empty() {
            let mut components = vec![AccentPhraseComponent::from_morphemes(prefix, dict)];
            components.extend(
                suffix
                    .iter()
                    .map(|m| AccentPhraseComponent::from_morphemes(std::slice::from_ref(m), dict)),
            );
            // 複合句のアクセントは構成要素からではなく形態素列全体から
            let accent = run_accent(&morphemes);
            Some(Self {
                components,
                accent,
                is_complex: true,
            })
        } else {
            let component = AccentPhraseComponent::from_morphemes(&morphemes, dict);
            let accent = component.accent();
            Some(Self {
                components: vec![component],
                accent,
                is_complex: false,
            })
        }
    }

    /// 構成要素の列を取得します
    #[inline(always)]
    pub fn components(&self) -> &[AccentPhraseComponent] {
        &self.components
    }

    /// 句の代表ピッチアクセント値を取得します
    #[inline(always)]
    pub fn accent(&self) -> PitchAccent {
        self.accent
    }

    /// 複合句（非基本語の先頭部+基本語の末尾部）かどうか
    #[inline(always)]
    pub fn is_complex(&self) -> bool {
        self.is_complex
    }
}

/// 形態素列からピッチアクセント値を計算します
///
/// 先頭形態素のアクセント数字スロット（カンマ区切りの複数値を取り得る）
/// の最初の値を代表とし、長さは連結済みの読み全体のモーラ数、2種フラグ
/// は先頭形態素の品詞（動詞・形容詞）から決まります。スロットが空で
/// あればアクセントは未知（mora -1・長さ0）です。計算後に特殊モーラ
/// 補正が適用されます。
fn run_accent(morphemes: &[Morpheme]) -> PitchAccent {
    let Some(head) = morphemes.first() else {
        return PitchAccent::UNKNOWN;
    };
    let reading: String = morphemes.iter().map(Morpheme::reading).collect();
    let digits = head.token().accent_digits();
    let Some(&first) = digits.first() else {
        return PitchAccent::UNKNOWN;
    };
    PitchAccent::new(first, mora_len(&reading), head.token().is_two_kind_pos())
        .with_special_mora_correction(&reading)
}
