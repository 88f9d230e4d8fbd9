//! かな変換とモーラ計算のユーティリティ
//!
//! このモジュールは、ひらがな・カタカナ間の相互変換と、日本語音韻論に
//! おけるモーラ（拍）の計算を提供します。
//!
//! モーラの数え方には2つの規則があります:
//!
//! - 拗音などの小書き文字（ャュョァィゥェォヮ）は独立したモーラを持たず、
//!   直前のモーラに付属します（「キャ」は1モーラ）。
//! - 促音「ッ」・長音「ー」・撥音「ン」はモーラとして数えられますが、
//!   それ自体がピッチの下降を担うことはできない特殊モーラです。

/// ひらがなブロックの先頭（ぁ）
const HIRAGANA_START: u32 = 0x3041;
/// ひらがなブロックの末尾（ゖ）
const HIRAGANA_END: u32 = 0x3096;
/// カタカナブロックの先頭（ァ）
const KATAKANA_START: u32 = 0x30A1;
/// カタカナブロックの末尾（ヶ）
const KATAKANA_END: u32 = 0x30F6;
/// ひらがなとカタカナのコードポイント差
const KANA_OFFSET: u32 = KATAKANA_START - HIRAGANA_START;

/// モーラとして数えない小書き文字（拗音・小書き母音）
///
/// 促音（っ/ッ）は特殊モーラであり独立したモーラとして数えるため、
/// この集合には含まれません。
const SMALL_KANA: &[char] = &[
    'ぁ', 'ぃ', 'ぅ', 'ぇ', 'ぉ', 'ゃ', 'ゅ', 'ょ', 'ゎ', 'ゕ', //
    'ァ', 'ィ', 'ゥ', 'ェ', 'ォ', 'ャ', 'ュ', 'ョ', 'ヮ', 'ヵ', 'ㇰ',
];

/// ひらがなをカタカナに変換します
///
/// かなブロック外の文字（漢字・英数字など）はそのまま通過します。
///
/// # 例
///
/// ```
/// # use yomigana::kana::hiragana_to_katakana;
/// assert_eq!(hiragana_to_katakana("使う"), "使ウ");
/// ```
pub fn hiragana_to_katakana(text: &str) -> String {
    text.chars()
        .map(|c| {
            let cp = u32::from(c);
            if (HIRAGANA_START..=HIRAGANA_END).contains(&cp) {
                char::from_u32(cp + KANA_OFFSET).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// カタカナをひらがなに変換します
///
/// かなブロック外の文字はそのまま通過します。
///
/// # 例
///
/// ```
/// # use yomigana::kana::katakana_to_hiragana;
/// assert_eq!(katakana_to_hiragana("ツカウ"), "つかう");
/// ```
pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars()
        .map(|c| {
            let cp = u32::from(c);
            if (KATAKANA_START..=KATAKANA_END).contains(&cp) {
                char::from_u32(cp - KANA_OFFSET).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// 小書き文字（拗音）かどうかを判定します
#[inline(always)]
pub fn is_small_kana(c: char) -> bool {
    SMALL_KANA.contains(&c)
}

/// 特殊モーラ（促音・長音・撥音）かどうかを判定します
///
/// 特殊モーラはモーラとして数えられますが、音韻規則上ピッチの下降を
/// 担うことができません。
#[inline(always)]
pub fn is_special_mora(c: char) -> bool {
    matches!(c, 'っ' | 'ッ' | 'ー' | 'ん' | 'ン')
}

/// 読み文字列のモーラ数を返します
///
/// 小書き文字は直前のモーラに付属するため数えられません。
///
/// # 例
///
/// ```
/// # use yomigana::kana::mora_len;
/// assert_eq!(mora_len("キャ"), 1);
/// assert_eq!(mora_len("キップ"), 3);
/// ```
pub fn mora_len(reading: &str) -> usize {
    reading.chars().filter(|&c| !is_small_kana(c)).count()
}

/// 小書き文字を取り除いたモーラ単位の文字列ビューを返します
///
/// 返されるベクターの第iの要素が第(i+1)モーラに対応します。
pub fn strip_small_kana(reading: &str) -> Vec<char> {
    reading.chars().filter(|&c| !is_small_kana(c)).collect()
}
