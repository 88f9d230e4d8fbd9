//! ピッチアクセントとアクセント結合コードの文法
//!
//! このモジュールは、語彙素の素性に含まれるコンパクトなアクセント
//! コードを解析・直列化します。コードは2つの閉じたタグ集合に分かれます:
//!
//! - [`ConnectionKind`]: 形態素結合時のアクセント結合規則（C系・F系・P系）
//! - [`ModificationKind`]: 結合時のアクセント変形規則（M系）
//!
//! 文法の概要:
//!
//! - `"*"` は未知を表します。
//! - `C1`〜`C5`、`F1`、`P1`/`P2`/`P4`/`P6`/`P13` はリテラルです。
//! - `%` を含むコード（例: `名詞%F1`）は品詞制限付きのラッパーで、
//!   内側のコードを再帰的に解析します。2段以上のネストは観測データに
//!   存在しないため、未知として診断ログに報告します。
//! - `@` を含むコード（例: `F2@1`、`F6@1,2`）は数値引数を取ります。
//!
//! 認識できないコードはハードエラーではなく、診断ログに報告した上で
//! 未知に解決されます。元の語彙素には未モデル化の稀なコードが含まれる
//! 可能性があり、可用性を厳密な検証より優先するためです。

use crate::kana::{is_special_mora, mora_len, strip_small_kana};

/// 単語・形態素のピッチアクセント値
///
/// `mora` はピッチが下降する直前のモーラ番号（1始まり）を表します。
/// `0` は平板型（下降なし）、`-1` は未知を意味します。
///
/// # 不変条件
///
/// `mora` は `-1` または `0..=length` の範囲内です。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PitchAccent {
    /// ピッチが下降するモーラ番号（-1は未知）
    pub mora: i32,
    /// 読み全体のモーラ数
    pub length: usize,
    /// 起伏式の2種（動詞・形容詞）かどうか
    pub is_two_kind: bool,
}

impl PitchAccent {
    /// 未知のピッチアクセント
    pub const UNKNOWN: Self = Self {
        mora: -1,
        length: 0,
        is_two_kind: false,
    };

    /// 新しいピッチアクセントを生成します
    ///
    /// `mora` が `0..=length` の範囲外であれば未知（`-1`）に丸められます。
    pub fn new(mora: i32, length: usize, is_two_kind: bool) -> Self {
        let mora = if (0..=length as i32).contains(&mora) {
            mora
        } else {
            -1
        };
        Self {
            mora,
            length,
            is_two_kind,
        }
    }

    /// アクセント値が未知かどうかを判定します
    #[inline(always)]
    pub const fn is_unknown(&self) -> bool {
        self.mora < 0
    }

    /// 特殊モーラ補正を適用したピッチアクセントを返します
    ///
    /// 下降位置のモーラが促音・長音・撥音のいずれかである場合、その
    /// モーラ自体はピッチの下降を担えないため、下降は直前のモーラに
    /// 帰属します。
    ///
    /// # 引数
    ///
    /// * `reading` - アクセント値の元になった読み（カタカナ）
    ///
    /// # 例
    ///
    /// ```
    /// # use yomigana::accent::PitchAccent;
    /// let raw = PitchAccent::new(2, 3, false);
    /// let fixed = raw.with_special_mora_correction("キップ");
    /// assert_eq!(fixed.mora, 1);
    /// ```
    pub fn with_special_mora_correction(self, reading: &str) -> Self {
        if self.mora <= 1 {
            return self;
        }
        let morae = strip_small_kana(reading);
        let idx = (self.mora - 1) as usize;
        match morae.get(idx) {
            Some(&c) if is_special_mora(c) => Self {
                mora: self.mora - 1,
                ..self
            },
            _ => self,
        }
    }

    /// 読みに対する素のアクセント数字からピッチアクセントを生成します
    pub(crate) fn from_digit(digit: i32, reading: &str, is_two_kind: bool) -> Self {
        Self::new(digit, mora_len(reading), is_two_kind)
    }
}

/// アクセント結合規則の閉じたタグ集合
///
/// 語彙素のアクセント結合コード（aConType相当のスロット）から解析され、
/// 生成後は不変です。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionKind {
    /// 未知または認識できないコード
    Unknown,
    /// 付属語結合型C1（自立語のアクセントを保存）
    C1,
    /// 付属語結合型C2（直前の語の最終モーラに下降）
    C2,
    /// 付属語結合型C3（付属語の第1モーラに下降）
    C3,
    /// 付属語結合型C4（結合後も平板化）
    C4,
    /// 付属語結合型C5（下降を消去）
    C5,
    /// 複合語結合型F1（前部要素のアクセントを保存）
    F1,
    /// 複合語結合型F2（引数モーラに下降）
    F2(i32),
    /// 複合語結合型F3（前部が平板のとき引数モーラに下降）
    F3(i32),
    /// 複合語結合型F4（常に引数モーラに下降）
    F4(i32),
    /// 複合語結合型F6（前部平板・起伏で引数を使い分け。第2引数は
    /// 省略時に第1引数と同値）
    F6(i32, i32),
    /// 接頭語結合型P1
    P1,
    /// 接頭語結合型P2
    P2,
    /// 接頭語結合型P4
    P4,
    /// 接頭語結合型P6
    P6,
    /// 接頭語結合型P13
    P13,
    /// 品詞制限付きの結合規則（例: `名詞%F1`）
    ///
    /// 隣接する形態素の品詞が `part_of_speech` と一致する場合のみ、
    /// 内側の規則が適用されます。
    Restricted {
        /// 制限対象の品詞
        part_of_speech: String,
        /// 内側の結合規則
        inner: Box<ConnectionKind>,
    },
}

impl ConnectionKind {
    /// コンパクトなコード文字列を解析します
    ///
    /// 認識できないコード・不正な整数・どちらのパターンにも一致しない
    /// コードは、`log::warn!` で報告した上で [`ConnectionKind::Unknown`]
    /// に解決されます。解析がハード失敗することはありません。
    pub fn parse(code: &str) -> Self {
        if code == "*" || code.is_empty() {
            return Self::Unknown;
        }
        if let Some((pos, inner)) = code.split_once('%') {
            if inner.contains('%') {
                log::warn!("nested accent restriction is unsupported: {code}");
                return Self::Unknown;
            }
            return Self::Restricted {
                part_of_speech: pos.to_string(),
                inner: Box::new(Self::parse(inner)),
            };
        }
        if let Some((tag, args)) = code.split_once('@') {
            return Self::parse_parameterized(code, tag, args);
        }
        match code {
            "C1" => Self::C1,
            "C2" => Self::C2,
            "C3" => Self::C3,
            "C4" => Self::C4,
            "C5" => Self::C5,
            "F1" => Self::F1,
            "P1" => Self::P1,
            "P2" => Self::P2,
            "P4" => Self::P4,
            "P6" => Self::P6,
            "P13" => Self::P13,
            _ => {
                log::warn!("unrecognized accent connection code: {code}");
                Self::Unknown
            }
        }
    }

    fn parse_parameterized(code: &str, tag: &str, args: &str) -> Self {
        let Some(nums) = parse_int_args(args) else {
            log::warn!("malformed accent code arguments: {code}");
            return Self::Unknown;
        };
        match (tag, nums.as_slice()) {
            ("F2", &[n]) => Self::F2(n),
            ("F3", &[n]) => Self::F3(n),
            ("F4", &[n]) => Self::F4(n),
            ("F6", &[n]) => Self::F6(n, n),
            ("F6", &[n, m]) => Self::F6(n, m),
            _ => {
                log::warn!("unrecognized accent connection code: {code}");
                Self::Unknown
            }
        }
    }

    /// 解析の逆操作。`parse(serialize(k)) == k` が成り立ちます
    pub fn serialize(&self) -> String {
        match self {
            Self::Unknown => "*".to_string(),
            Self::C1 => "C1".to_string(),
            Self::C2 => "C2".to_string(),
            Self::C3 => "C3".to_string(),
            Self::C4 => "C4".to_string(),
            Self::C5 => "C5".to_string(),
            Self::F1 => "F1".to_string(),
            Self::F2(n) => format!("F2@{n}"),
            Self::F3(n) => format!("F3@{n}"),
            Self::F4(n) => format!("F4@{n}"),
            Self::F6(n, m) if n == m => format!("F6@{n}"),
            Self::F6(n, m) => format!("F6@{n},{m}"),
            Self::P1 => "P1".to_string(),
            Self::P2 => "P2".to_string(),
            Self::P4 => "P4".to_string(),
            Self::P6 => "P6".to_string(),
            Self::P13 => "P13".to_string(),
            Self::Restricted {
                part_of_speech,
                inner,
            } => format!("{part_of_speech}%{}", inner.serialize()),
        }
    }

    /// 直前の形態素（品詞 `pos`）との結合を許すかどうか
    ///
    /// C系・F系は付属語・複合語後部の規則であり、先行する自立語に後ろ
    /// から結合します。P系は接頭語規則のため後方結合しません。
    pub fn can_be_combined_with_prev(&self, pos: &str) -> bool {
        match self {
            Self::C1 | Self::C2 | Self::C3 | Self::C4 | Self::C5 => !pos.is_empty(),
            Self::F1 | Self::F2(_) | Self::F3(_) | Self::F4(_) | Self::F6(..) => !pos.is_empty(),
            Self::Restricted {
                part_of_speech,
                inner,
            } => part_of_speech == pos && inner.can_be_combined_with_prev(pos),
            _ => false,
        }
    }

    /// 直後の形態素（品詞 `pos`）との結合を許すかどうか
    ///
    /// P系は接頭語規則であり、後続の自立語に前から結合します。
    pub fn can_be_combined_with_next(&self, pos: &str) -> bool {
        match self {
            Self::P1 | Self::P2 | Self::P4 | Self::P6 | Self::P13 => !pos.is_empty(),
            Self::Restricted {
                part_of_speech,
                inner,
            } => part_of_speech == pos && inner.can_be_combined_with_next(pos),
            _ => false,
        }
    }
}

/// アクセント変形規則の閉じたタグ集合
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModificationKind {
    /// 未知または認識できないコード
    Unknown,
    /// M1: 優勢型（引数モーラに強制的な下降）
    Dominant(i32),
    /// M2: 劣勢型（下降を失いやすい）
    Recessive(i32),
    /// M4: 前部が平板なら同型、さもなくば引数モーラに下降
    HeibanHeadSameElseAccent(i32),
}

impl ModificationKind {
    /// コンパクトなコード文字列を解析します
    ///
    /// 認識できないコードは診断ログに報告した上で
    /// [`ModificationKind::Unknown`] に解決されます。
    pub fn parse(code: &str) -> Self {
        if code == "*" || code.is_empty() {
            return Self::Unknown;
        }
        let parsed = code.split_once('@').and_then(|(tag, args)| {
            let nums = parse_int_args(args)?;
            match (tag, nums.as_slice()) {
                ("M1", &[n]) => Some(Self::Dominant(n)),
                ("M2", &[n]) => Some(Self::Recessive(n)),
                ("M4", &[n]) => Some(Self::HeibanHeadSameElseAccent(n)),
                _ => None,
            }
        });
        parsed.unwrap_or_else(|| {
            log::warn!("unrecognized accent modification code: {code}");
            Self::Unknown
        })
    }

    /// 解析の逆操作。`parse(serialize(k)) == k` が成り立ちます
    pub fn serialize(&self) -> String {
        match self {
            Self::Unknown => "*".to_string(),
            Self::Dominant(n) => format!("M1@{n}"),
            Self::Recessive(n) => format!("M2@{n}"),
            Self::HeibanHeadSameElseAccent(n) => format!("M4@{n}"),
        }
    }
}

/// カンマ区切りの符号付き整数リストを解析します
fn parse_int_args(args: &str) -> Option<Vec<i32>> {
    args.split(',').map(|a| a.trim().parse().ok()).collect()
}

/// 素性スロットに含まれる結合コードのリストを解析します
///
/// スロットはカンマ区切りで複数のコードを保持できますが、`F6@1,2` の
/// ような引数内カンマとの曖昧性があります。裸の整数に見える断片は
/// 直前の断片の `@` 引数リストの続きとして連結されます。
pub fn parse_connection_list(slot: &str) -> Vec<ConnectionKind> {
    if slot == "*" || slot.is_empty() {
        return vec![ConnectionKind::Unknown];
    }
    let mut groups: Vec<String> = vec![];
    for frag in slot.split(',') {
        let continues_args = frag
            .strip_prefix('-')
            .unwrap_or(frag)
            .chars()
            .all(|c| c.is_ascii_digit())
            && !frag.is_empty()
            && groups.last().is_some_and(|g| g.contains('@'));
        if continues_args {
            let last = groups.last_mut().unwrap();
            last.push(',');
            last.push_str(frag);
        } else {
            groups.push(frag.to_string());
        }
    }
    groups.iter().map(|g| ConnectionKind::parse(g)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literals() {
        assert_eq!(ConnectionKind::parse("*"), ConnectionKind::Unknown);
        assert_eq!(ConnectionKind::parse("C1"), ConnectionKind::C1);
        assert_eq!(ConnectionKind::parse("C5"), ConnectionKind::C5);
        assert_eq!(ConnectionKind::parse("F1"), ConnectionKind::F1);
        assert_eq!(ConnectionKind::parse("P13"), ConnectionKind::P13);
    }

    #[test]
    fn test_parse_parameterized() {
        assert_eq!(ConnectionKind::parse("F2@1"), ConnectionKind::F2(1));
        assert_eq!(ConnectionKind::parse("F4@-2"), ConnectionKind::F4(-2));
        assert_eq!(ConnectionKind::parse("F6@2"), ConnectionKind::F6(2, 2));
        assert_eq!(ConnectionKind::parse("F6@1,3"), ConnectionKind::F6(1, 3));
    }

    #[test]
    fn test_parse_restricted() {
        assert_eq!(
            ConnectionKind::parse("名詞%F1"),
            ConnectionKind::Restricted {
                part_of_speech: "名詞".to_string(),
                inner: Box::new(ConnectionKind::F1),
            }
        );
    }

    #[test]
    fn test_parse_nested_restriction_is_unknown() {
        assert_eq!(ConnectionKind::parse("名詞%動詞%F1"), ConnectionKind::Unknown);
    }

    #[test]
    fn test_parse_garbage_is_unknown() {
        assert_eq!(ConnectionKind::parse("Z9"), ConnectionKind::Unknown);
        assert_eq!(ConnectionKind::parse("F2@x"), ConnectionKind::Unknown);
        assert_eq!(ConnectionKind::parse("F2@1,2"), ConnectionKind::Unknown);
        assert_eq!(ModificationKind::parse("M9@1"), ModificationKind::Unknown);
    }

    #[test]
    fn test_connection_roundtrip() {
        let kinds = [
            ConnectionKind::Unknown,
            ConnectionKind::C1,
            ConnectionKind::C2,
            ConnectionKind::C3,
            ConnectionKind::C4,
            ConnectionKind::C5,
            ConnectionKind::F1,
            ConnectionKind::F2(3),
            ConnectionKind::F3(-1),
            ConnectionKind::F4(2),
            ConnectionKind::F6(1, 1),
            ConnectionKind::F6(1, 4),
            ConnectionKind::P1,
            ConnectionKind::P2,
            ConnectionKind::P4,
            ConnectionKind::P6,
            ConnectionKind::P13,
            ConnectionKind::Restricted {
                part_of_speech: "名詞".to_string(),
                inner: Box::new(ConnectionKind::F6(2, 3)),
            },
        ];
        for k in kinds {
            assert_eq!(ConnectionKind::parse(&k.serialize()), k, "{k:?}");
        }
    }

    #[test]
    fn test_modification_roundtrip() {
        let kinds = [
            ModificationKind::Unknown,
            ModificationKind::Dominant(1),
            ModificationKind::Recessive(2),
            ModificationKind::HeibanHeadSameElseAccent(3),
        ];
        for k in kinds {
            assert_eq!(ModificationKind::parse(&k.serialize()), k, "{k:?}");
        }
    }

    #[test]
    fn test_parse_connection_list_keeps_f6_args_whole() {
        assert_eq!(
            parse_connection_list("C1,F6@1,2,P1"),
            vec![
                ConnectionKind::C1,
                ConnectionKind::F6(1, 2),
                ConnectionKind::P1,
            ]
        );
    }

    #[test]
    fn test_combinability() {
        assert!(ConnectionKind::C1.can_be_combined_with_prev("名詞"));
        assert!(!ConnectionKind::C1.can_be_combined_with_next("名詞"));
        assert!(ConnectionKind::P2.can_be_combined_with_next("名詞"));
        assert!(!ConnectionKind::P2.can_be_combined_with_prev("名詞"));
        assert!(!ConnectionKind::Unknown.can_be_combined_with_prev("名詞"));

        let restricted = ConnectionKind::Restricted {
            part_of_speech: "名詞".to_string(),
            inner: Box::new(ConnectionKind::F1),
        };
        assert!(restricted.can_be_combined_with_prev("名詞"));
        assert!(!restricted.can_be_combined_with_prev("動詞"));
    }

    #[test]
    fn test_special_mora_correction() {
        let raw = PitchAccent::new(2, 3, false);
        assert_eq!(raw.with_special_mora_correction("キップ").mora, 1);
        // 下降が特殊モーラに当たらなければ補正されない
        let plain = PitchAccent::new(2, 4, false);
        assert_eq!(plain.with_special_mora_correction("タベモノ").mora, 2);
        // 第1モーラの下降は補正対象外
        let head = PitchAccent::new(1, 2, false);
        assert_eq!(head.with_special_mora_correction("ンー").mora, 1);
    }

    #[test]
    fn test_pitch_accent_out_of_range_is_unknown() {
        assert!(PitchAccent::new(5, 3, false).is_unknown());
        assert!(PitchAccent::new(-2, 3, false).is_unknown());
        assert!(!PitchAccent::new(0, 3, false).is_unknown());
    }
}
