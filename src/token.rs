//! 生トークンと素性配列のアダプタ
//!
//! このモジュールは、外部の語彙素解析器が出力する生トークン
//! （[`RawToken`]）を表現します。トークンは表層形と固定幅の素性配列を
//! 持ち、各インデックスには固定の言語学的意味があります（読み・品詞・
//! アクセント数字・結合コードなど）。
//!
//! 素性配列を型のない配列のままコア全体に引き回すとインデックスの
//! 打ち間違いに脆くなるため、意味のある名前を持つアクセサをこの境界で
//! 提供し、下流はそれだけを使用します。

use crate::accent::{parse_connection_list, ConnectionKind, ModificationKind, PitchAccent};
use crate::utils::parse_feature_row;

/// 素性スロットのプレースホルダ値
pub const PLACEHOLDER: &str = "*";

// 素性配列の固定インデックス。
const FEATURE_POS: usize = 0;
const FEATURE_POS_SUBTYPE: usize = 1;
const FEATURE_POS_DETAIL: usize = 2;
const FEATURE_CONJUGATION_TYPE: usize = 4;
const FEATURE_ORIGINAL: usize = 7;
const FEATURE_PRONUNCIATION: usize = 9;
const FEATURE_PRONUNCIATION_BASE: usize = 11;
const FEATURE_KANA: usize = 20;
const FEATURE_KANA_BASE: usize = 21;
const FEATURE_ACCENT: usize = 24;
const FEATURE_CONNECTION: usize = 25;
const FEATURE_MODIFICATION: usize = 26;
const FEATURE_LEXICON_ID: usize = 28;

/// 例外リゾルバの結合対象になる読み・発音系スロットの範囲。
const READING_SLOT_RANGES: [std::ops::RangeInclusive<usize>; 2] = [6..=11, 20..=23];

/// 語彙素解析器が出力する生トークン
///
/// 表層形・固定幅の素性配列・ふりがな非表示フラグを保持します。
/// 素性配列は外部の語彙素解析器の出力であり、このコアからは例外
/// リゾルバ（[`crate::tokenizer::resolvers`]）のみが変更します。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawToken {
    surface: String,
    features: Vec<String>,
    hide_furigana: bool,
}

impl RawToken {
    /// 表層形と素性配列から生トークンを生成します
    pub fn new<S, I, F>(surface: S, features: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = F>,
        F: AsRef<str>,
    {
        Self {
            surface: surface.into(),
            features: features
                .into_iter()
                .map(|f| f.as_ref().to_string())
                .collect(),
            hide_furigana: false,
        }
    }

    /// CSV形式の素性行から生トークンを生成します
    ///
    /// # 引数
    ///
    /// * `surface` - 表層形
    /// * `feature_row` - カンマ区切りの素性行（引用符付きフィールド可）
    ///
    /// # 例
    ///
    /// ```
    /// # use yomigana::token::RawToken;
    /// let token = RawToken::from_csv("は", "助詞,係助詞,*,*,*,*,ハ,は,は,ワ");
    /// assert_eq!(token.pos(), "助詞");
    /// assert_eq!(token.surface_pronunciation(), "ワ");
    /// ```
    pub fn from_csv<S>(surface: S, feature_row: &str) -> Self
    where
        S: Into<String>,
    {
        Self {
            surface: surface.into(),
            features: parse_feature_row(feature_row),
            hide_furigana: false,
        }
    }

    /// トークンの表層形を取得します
    ///
    /// Gets the surface string of the token.
    #[inline(always)]
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// 素性配列への参照を取得します
    #[inline(always)]
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// 指定インデックスの素性を取得します
    ///
    /// 範囲外のインデックスはプレースホルダ（`"*"`）として扱われます。
    #[inline(always)]
    pub fn feature(&self, index: usize) -> &str {
        self.features.get(index).map_or(PLACEHOLDER, String::as_str)
    }

    fn slot(&self, index: usize) -> Option<&str> {
        let value = self.feature(index);
        (!value.is_empty() && value != PLACEHOLDER).then_some(value)
    }

    /// 品詞を取得します
    #[inline(always)]
    pub fn pos(&self) -> &str {
        self.feature(FEATURE_POS)
    }

    /// 品詞細分類を取得します
    #[inline(always)]
    pub fn pos_subtype(&self) -> &str {
        self.feature(FEATURE_POS_SUBTYPE)
    }

    /// 活用型（例: 下一段-バ行）を取得します
    #[inline(always)]
    pub fn conjugation_type(&self) -> &str {
        self.feature(FEATURE_CONJUGATION_TYPE)
    }

    /// 原形（語彙素見出し）を取得します
    #[inline(always)]
    pub fn original(&self) -> &str {
        self.slot(FEATURE_ORIGINAL).unwrap_or(&self.surface)
    }

    /// 安定した語彙素IDを取得します
    #[inline(always)]
    pub fn lexicon_id(&self) -> &str {
        self.feature(FEATURE_LEXICON_ID)
    }

    /// 読み（カタカナ）を取得します
    ///
    /// 構造化された読みスロットが存在しプレースホルダでなければそれを
    /// 使い、なければ発音スロット、それもなければ表層形に落ちます。
    pub fn reading(&self) -> &str {
        self.slot(FEATURE_KANA)
            .or_else(|| self.slot(FEATURE_PRONUNCIATION))
            .unwrap_or(&self.surface)
    }

    /// 表層発音（カタカナ）を取得します
    ///
    /// 発音スロットがプレースホルダであれば表層形に落ちます。読みとは
    /// 独立にフォールバックが適用されます。
    pub fn surface_pronunciation(&self) -> &str {
        self.slot(FEATURE_PRONUNCIATION).unwrap_or(&self.surface)
    }

    /// モーラ補正済みのピッチアクセント値のリストを取得します
    ///
    /// アクセント数字スロットはカンマまたはスラッシュ区切りの複数値を
    /// 取り得ます。スロットが空であればアクセントは未知です。
    pub fn pitch_accents(&self) -> Vec<PitchAccent> {
        let reading = self.reading();
        let is_two_kind = self.is_two_kind_pos();
        let accents: Vec<PitchAccent> = self
            .accent_digits()
            .into_iter()
            .map(|digit| {
                PitchAccent::from_digit(digit, reading, is_two_kind)
                    .with_special_mora_correction(reading)
            })
            .collect();
        if accents.is_empty() {
            vec![PitchAccent::UNKNOWN]
        } else {
            accents
        }
    }

    /// アクセント数字スロットの生の数値リストを取得します
    ///
    /// スロットが空・プレースホルダの場合は空のベクターを返します。
    pub(crate) fn accent_digits(&self) -> Vec<i32> {
        self.slot(FEATURE_ACCENT)
            .map(|digits| {
                digits
                    .split(|c| c == ',' || c == '/')
                    .filter_map(|d| d.trim().parse().ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// アクセント結合規則のリストを取得します
    pub fn connection_kinds(&self) -> Vec<ConnectionKind> {
        parse_connection_list(self.feature(FEATURE_CONNECTION))
    }

    /// アクセント変形規則を取得します
    pub fn modification_kind(&self) -> ModificationKind {
        ModificationKind::parse(self.feature(FEATURE_MODIFICATION))
    }

    /// 文境界（文末句読点）かどうかを判定します
    pub fn is_sentence_boundary(&self) -> bool {
        if matches!(self.pos(), "補助記号" | "記号") && self.pos_subtype() == "句点" {
            return true;
        }
        matches!(self.surface.as_str(), "。" | "！" | "？" | "!" | "?")
    }

    /// 起伏式2種（動詞・形容詞）の品詞かどうかを判定します
    #[inline(always)]
    pub fn is_two_kind_pos(&self) -> bool {
        matches!(self.pos(), "動詞" | "形容詞")
    }

    /// 直前の語に付属する品詞（助動詞・助詞・接尾辞、または接続助詞・
    /// 副助詞の細分類）かどうかを判定します
    pub fn attaches_to_previous(&self) -> bool {
        matches!(self.pos(), "助動詞" | "助詞" | "接尾辞")
            || matches!(self.pos_subtype(), "接続助詞" | "副助詞")
    }

    /// 接頭辞かどうかを判定します
    #[inline(always)]
    pub fn is_prefix(&self) -> bool {
        self.pos() == "接頭辞"
    }

    /// 名詞類（名詞・代名詞）かどうかを判定します
    #[inline(always)]
    pub fn is_noun_class(&self) -> bool {
        matches!(self.pos(), "名詞" | "代名詞")
    }

    /// 連体詞かどうかを判定します
    #[inline(always)]
    pub fn is_pre_noun_adjectival(&self) -> bool {
        self.pos() == "連体詞"
    }

    /// 数詞かどうかを判定します
    #[inline(always)]
    pub fn is_numeral(&self) -> bool {
        self.pos_subtype() == "数詞"
    }

    /// 助数詞として結合可能かどうかを判定します
    pub fn is_classifier_compatible(&self) -> bool {
        self.pos_subtype() == "助数詞可能" || self.feature(FEATURE_POS_DETAIL) == "助数詞可能"
    }

    /// ふりがなを常に隠すかどうかを取得します
    #[inline(always)]
    pub fn hide_furigana(&self) -> bool {
        self.hide_furigana
    }

    /// ふりがな非表示フラグを設定します（リゾルバ専用）
    #[inline(always)]
    pub(crate) fn set_hide_furigana(&mut self, hide: bool) {
        self.hide_furigana = hide;
    }

    /// 指定インデックスの素性を書き換えます（リゾルバ専用）
    ///
    /// 配列が短ければプレースホルダで埋めて拡張します。
    pub(crate) fn set_feature<S>(&mut self, index: usize, value: S)
    where
        S: Into<String>,
    {
        if self.features.len() <= index {
            self.features.resize(index + 1, PLACEHOLDER.to_string());
        }
        self.features[index] = value.into();
    }

    /// 発音系スロットを指定の値で上書きします（リゾルバ専用）
    pub(crate) fn force_pronunciation(&mut self, pron: &str) {
        self.set_feature(FEATURE_PRONUNCIATION, pron);
        self.set_feature(FEATURE_PRONUNCIATION_BASE, pron);
    }

    /// かな読みスロットを指定の値で上書きします（リゾルバ専用）
    pub(crate) fn set_kana_reading(&mut self, kana: &str) {
        self.set_feature(FEATURE_KANA, kana);
        self.set_feature(FEATURE_KANA_BASE, kana);
    }

    /// アクセント数字スロットを上書きします（リゾルバ専用）
    pub(crate) fn set_accent_digits(&mut self, digits: &str) {
        self.set_feature(FEATURE_ACCENT, digits);
    }

    /// 後続トークンを素性単位で結合した新しいトークンを返します
    ///
    /// 表層形を連結し、読み・発音系スロット（素性6〜11と20〜23）を
    /// スロットごとに連結します。プレースホルダは空として扱い、結合
    /// 結果が空であればプレースホルダに戻します。それ以外の素性は
    /// 先頭トークンのものを保持します。
    pub(crate) fn merged_with(&self, next: &Self) -> Self {
        let mut merged = self.clone();
        merged.surface.push_str(&next.surface);
        for range in READING_SLOT_RANGES {
            for index in range {
                let mut value = String::new();
                if let Some(head) = self.slot(index) {
                    value.push_str(head);
                }
                if let Some(tail) = next.slot(index) {
                    value.push_str(tail);
                }
                if value.is_empty() {
                    value.push_str(PLACEHOLDER);
                }
                merged.set_feature(index, value);
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::token_with;

    #[test]
    fn test_reading_fallback_chain() {
        let with_kana = token_with("東京", &[(9, "トーキョー"), (20, "トウキョウ")]);
        assert_eq!(with_kana.reading(), "トウキョウ");
        assert_eq!(with_kana.surface_pronunciation(), "トーキョー");

        let pron_only = token_with("東京", &[(9, "トーキョー")]);
        assert_eq!(pron_only.reading(), "トーキョー");

        let bare = token_with("東京", &[]);
        assert_eq!(bare.reading(), "東京");
        assert_eq!(bare.surface_pronunciation(), "東京");
    }

    #[test]
    fn test_conjugation_type_accessor() {
        let verb = token_with("食べ", &[(0, "動詞"), (4, "下一段-バ行")]);
        assert_eq!(verb.conjugation_type(), "下一段-バ行");
        // スロットがなければプレースホルダに落ちる
        let noun = token_with("犬", &[(0, "名詞")]);
        assert_eq!(noun.conjugation_type(), "*");
    }

    #[test]
    fn test_pitch_accents_from_digits() {
        let token = token_with("橋", &[(20, "ハシ"), (24, "2")]);
        let accents = token.pitch_accents();
        assert_eq!(accents.len(), 1);
        assert_eq!(accents[0].mora, 2);
        assert_eq!(accents[0].length, 2);
        assert!(!accents[0].is_two_kind);
    }

    #[test]
    fn test_pitch_accents_multiple_and_unknown() {
        let multi = token_with("東京都", &[(20, "トウキョウト"), (24, "1/5")]);
        assert_eq!(multi.pitch_accents().len(), 2);

        let unknown = token_with("未知", &[(20, "ミチ")]);
        assert_eq!(unknown.pitch_accents(), vec![PitchAccent::UNKNOWN]);
    }

    #[test]
    fn test_pitch_accents_special_mora_corrected() {
        // 切符: 生のアクセント数字2はッに当たるため1に補正される
        let token = token_with("切符", &[(20, "キップ"), (24, "2")]);
        assert_eq!(token.pitch_accents()[0].mora, 1);
    }

    #[test]
    fn test_sentence_boundary() {
        let period = token_with("。", &[(0, "補助記号"), (1, "句点")]);
        assert!(period.is_sentence_boundary());
        let excl = token_with("！", &[(0, "補助記号")]);
        assert!(excl.is_sentence_boundary());
        let noun = token_with("東京", &[(0, "名詞")]);
        assert!(!noun.is_sentence_boundary());
    }

    #[test]
    fn test_merged_with_concatenates_reading_slots() {
        let head = token_with("食べ", &[(7, "食べる"), (9, "タベ"), (20, "タベ")]);
        let tail = token_with("た", &[(9, "タ"), (20, "タ")]);
        let merged = head.merged_with(&tail);
        assert_eq!(merged.surface(), "食べた");
        assert_eq!(merged.feature(9), "タベタ");
        assert_eq!(merged.feature(20), "タベタ");
        // 読み系範囲の外の素性は先頭トークンのまま
        assert_eq!(merged.feature(7), "食べる");
    }

    #[test]
    fn test_merged_with_placeholder_slots() {
        let head = token_with("あ", &[(9, "ア")]);
        let tail = token_with("い", &[]);
        let merged = head.merged_with(&tail);
        assert_eq!(merged.feature(9), "ア");
        assert_eq!(merged.feature(10), "*");
    }
}
