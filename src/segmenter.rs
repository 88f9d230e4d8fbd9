//! 形態素セグメンタ
//!
//! このモジュールは、連続する生トークンを言語学的に正しいまとまり
//! （[`Morpheme`]）に統合します。統合は3種類の根拠に基づきます:
//!
//! 1. 品詞規則: 助動詞・助詞・接尾辞は直前の語に、接頭辞は直後の語に
//!    付属します。
//! 2. アクセント結合規則: トークンの結合コードが隣接形態素の品詞との
//!    結合を許す場合に統合します。
//! 3. 辞書に裏付けられた有界の最長一致探索: 名詞的な文脈では、後続の
//!    最大10トークンを走査し、表層形または正規化済み読みで辞書に存在
//!    する最長の複合語を採用します。
//!
//! 規則1・2は次のトークンを直前の形態素そのものに統合し（「食べた」は
//! 1形態素になる）、規則3の最長一致は一致長さ分のトークンを新しい
//! 形態素として一括で連結列に追加します。

use crate::dictionary::Dictionary;
use crate::kana::katakana_to_hiragana;
use crate::token::RawToken;
use crate::tokenizer::TokenStream;

/// 最長一致探索で先読みするトークン数の上限。
const LONGEST_MATCH_WINDOW: usize = 10;

/// 1つ以上の生トークンが統合された形態素
///
/// 解決済みの発音・表層発音・ルビ用読み・基本語フラグを持ち、下流の
/// 照会のために先頭トークンの素性配列を保持します。セグメンタが生成
/// した後は不変です。
#[derive(Clone, Debug)]
pub struct Morpheme {
    token: RawToken,
    is_basic: bool,
}

impl Morpheme {
    /// 単一の生トークンから形態素を生成します
    pub(crate) fn from_token(token: RawToken) -> Self {
        let is_basic = matches!(
            token.pos(),
            "名詞" | "代名詞" | "動詞" | "形容詞" | "形状詞" | "副詞" | "連体詞" | "感動詞"
        ) && !token.is_numeral();
        Self { token, is_basic }
    }

    /// 次のトークンをこの形態素に統合します
    ///
    /// 表層形と読み・発音系スロットが連結されます。基本語フラグと
    /// その他の素性は先頭トークンのものを保ちます。
    pub(crate) fn absorb(&mut self, next: &RawToken) {
        self.token = self.token.merged_with(next);
    }

    /// 形態素の表層形を取得します
    ///
    /// Gets the surface string of the morpheme.
    #[inline(always)]
    pub fn surface(&self) -> &str {
        self.token.surface()
    }

    /// 原形（語彙素見出し）を取得します
    #[inline(always)]
    pub fn original(&self) -> &str {
        self.token.original()
    }

    /// 解決済みの読み（カタカナ）を取得します
    #[inline(always)]
    pub fn reading(&self) -> &str {
        self.token.reading()
    }

    /// 表層発音（カタカナ）を取得します
    #[inline(always)]
    pub fn surface_pronunciation(&self) -> &str {
        self.token.surface_pronunciation()
    }

    /// 基本語（単独で表示可能な内容語）かどうかを取得します
    #[inline(always)]
    pub fn is_basic(&self) -> bool {
        self.is_basic
    }

    /// ふりがなを常に隠すかどうかを取得します
    #[inline(always)]
    pub fn hide_furigana(&self) -> bool {
        self.token.hide_furigana()
    }

    /// 統合済みトークン（先頭トークンの素性配列を含む）を取得します
    #[inline(always)]
    pub fn token(&self) -> &RawToken {
        &self.token
    }

    /// 直後のトークンに対する結合可能性を判定します（後方検査）
    fn can_attach_next(&self, next_pos: &str) -> bool {
        self.token
            .connection_kinds()
            .iter()
            .any(|k| k.can_be_combined_with_next(next_pos))
    }

    /// 形態素の連結列からひとまとまりの解析を行います
    ///
    /// 停止条件: トークンが尽きた、次が文境界、または直前の形態素の
    /// 表層発音が空（不正なエントリのため、壊れたデータを伝播させる
    /// より停止する）。
    ///
    /// 各統合ステップの前に例外リゾルバのパイプラインが実行されます。
    ///
    /// # 引数
    ///
    /// * `stream` - 消費対象のトークンカーソル
    /// * `dict` - 最長一致探索に使用する外部辞書
    pub fn parse_multiple<D>(stream: &mut TokenStream, dict: &D) -> Vec<Self>
    where
        D: Dictionary + ?Sized,
    {
        let mut morphemes: Vec<Self> = vec![];
        loop {
            stream.apply_resolvers();
            let Some(next) = stream.peek() else { break };
            if next.is_sentence_boundary() {
                break;
            }

            let Some(last) = morphemes.last() else {
                let token = match stream.consume() {
                    Some(token) => token,
                    None => break,
                };
                morphemes.push(Self::from_token(token));
                continue;
            };
            if last.surface_pronunciation().is_empty() {
                break;
            }

            // 規則1: 付属語の品詞、または直前が接頭辞
            let rule_pos = next.attaches_to_previous() || last.token.is_prefix();
            // 規則2: アクセント結合コードの前方・後方互換、または数詞+助数詞
            let rule_connection = !rule_pos
                && (next
                    .connection_kinds()
                    .iter()
                    .any(|k| k.can_be_combined_with_prev(last.token.pos()))
                    || last.can_attach_next(next.pos())
                    || (last.token.is_numeral() && next.is_classifier_compatible()));
            if rule_pos || rule_connection {
                let token = match stream.consume() {
                    Some(token) => token,
                    None => break,
                };
                morphemes.last_mut().unwrap().absorb(&token);
                continue;
            }

            // 規則3: 名詞的な文脈でなければ統合を終了する
            let noun_context = next.is_noun_class()
                || last.token.is_noun_class()
                || last.token.is_pre_noun_adjectival();
            if !noun_context {
                break;
            }

            // 規則4: 有界の最長一致探索
            let count = longest_match_len(&morphemes, stream, dict);
            if count == 0 {
                break;
            }
            let Ok(tokens) = stream.consume_n(count) else {
                break;
            };
            morphemes.extend(tokens.into_iter().map(Self::from_token));
        }
        morphemes
    }
}

/// 既に統合済みのテキストに続く、辞書が裏付ける最長の複合語長を探索します
///
/// 後続の最大 [`LONGEST_MATCH_WINDOW`] トークン（文境界で打ち切り）を
/// 走査し、統合済みの表層形・読みに候補を伸ばしながら連結した文字列が
/// 辞書に存在するか（表層形または正規化済みひらがな読みで）を照会し、
/// 一致した最長のトークン数を返します。一致がなければ0を返します。
fn longest_match_len<D>(morphemes: &[Morpheme], stream: &TokenStream, dict: &D) -> usize
where
    D: Dictionary + ?Sized,
{
    let accumulated_surface: String = morphemes.iter().map(Morpheme::surface).collect();
    let accumulated_reading: String = morphemes.iter().map(Morpheme::reading).collect();

    let mut longest = 0;
    let mut candidate_surface = accumulated_surface;
    let mut candidate_reading = accumulated_reading;
    for (i, token) in stream.iter().take(LONGEST_MATCH_WINDOW).enumerate() {
        if token.is_sentence_boundary() {
            break;
        }
        candidate_surface.push_str(token.surface());
        candidate_reading.push_str(token.reading());
        if dict.contains_word(&candidate_surface)
            || dict.contains_word(&katakana_to_hiragana(&candidate_reading))
        {
            longest = i + 1;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::HashSetDictionary;
    use crate::test_utils::{period_token, token_with, word_token};

    fn empty_dict() -> HashSetDictionary {
        HashSetDictionary::default()
    }

    #[test]
    fn test_auxiliary_merges_unconditionally() {
        // 食べ(動詞) + た(助動詞) は辞書の内容と無関係に1形態素になる
        let tabe = word_token("食べ", "動詞", "タベ", "タベ", "2");
        let ta = token_with("た", &[(0, "助動詞"), (9, "タ"), (20, "タ")]);
        let mut stream = TokenStream::new([tabe, ta]);
        let morphemes = Morpheme::parse_multiple(&mut stream, &empty_dict());
        assert_eq!(morphemes.len(), 1);
        assert_eq!(morphemes[0].surface(), "食べた");
        assert_eq!(morphemes[0].reading(), "タベタ");
        assert!(morphemes[0].is_basic());
    }

    #[test]
    fn test_stops_at_sentence_boundary() {
        let tokyo = word_token("東京", "名詞", "トウキョウ", "トーキョー", "0");
        let mut stream = TokenStream::new([tokyo, period_token()]);
        let morphemes = Morpheme::parse_multiple(&mut stream, &empty_dict());
        assert_eq!(morphemes.len(), 1);
        // 境界トークンは消費されずに残る
        assert_eq!(stream.remaining(), 1);
    }

    #[test]
    fn test_prefix_merges_forward() {
        let o = token_with("お", &[(0, "接頭辞"), (9, "オ"), (20, "オ")]);
        let sushi = word_token("寿司", "名詞", "スシ", "スシ", "1");
        let mut stream = TokenStream::new([o, sushi]);
        let morphemes = Morpheme::parse_multiple(&mut stream, &empty_dict());
        assert_eq!(morphemes.len(), 1);
        assert_eq!(morphemes[0].surface(), "お寿司");
    }

    #[test]
    fn test_connection_kind_merges() {
        // 結合コードC1を持つ接尾的な語は前方検査で統合される
        let yama = word_token("山", "名詞", "ヤマ", "ヤマ", "2");
        let mut kawa = word_token("川", "名詞", "カワ", "カワ", "2");
        kawa.set_feature(25, "C1");
        let mut stream = TokenStream::new([yama, kawa]);
        let morphemes = Morpheme::parse_multiple(&mut stream, &empty_dict());
        assert_eq!(morphemes.len(), 1);
        assert_eq!(morphemes[0].surface(), "山川");
    }

    #[test]
    fn test_longest_match_appends_compound() {
        // 東京 + 都 + 庁: 辞書に「東京都庁」があれば2トークンまで伸びる
        let dict = HashSetDictionary::new(["東京都", "東京都庁"]);
        let tokyo = word_token("東京", "名詞", "トウキョウ", "トーキョー", "0");
        let to = word_token("都", "名詞", "ト", "ト", "1");
        let cho = word_token("庁", "名詞", "チョウ", "チョー", "1");
        let mut stream = TokenStream::new([tokyo, to, cho]);
        let morphemes = Morpheme::parse_multiple(&mut stream, &dict);
        assert_eq!(morphemes.len(), 3);
        let surface: String = morphemes.iter().map(Morpheme::surface).collect();
        assert_eq!(surface, "東京都庁");
    }

    #[test]
    fn test_longest_match_by_normalized_reading() {
        // 表層形ではなくひらがな正規化済みの読みで一致する場合
        let dict = HashSetDictionary::new(["とうきょうと"]);
        let tokyo = word_token("東京", "名詞", "トウキョウ", "トーキョー", "0");
        let to = word_token("都", "名詞", "ト", "ト", "1");
        let mut stream = TokenStream::new([tokyo, to]);
        let morphemes = Morpheme::parse_multiple(&mut stream, &dict);
        assert_eq!(morphemes.len(), 2);
    }

    #[test]
    fn test_longest_match_zero_stops() {
        let dict = empty_dict();
        let tokyo = word_token("東京", "名詞", "トウキョウ", "トーキョー", "0");
        let inu = word_token("犬", "名詞", "イヌ", "イヌ", "2");
        let mut stream = TokenStream::new([tokyo, inu]);
        let morphemes = Morpheme::parse_multiple(&mut stream, &dict);
        assert_eq!(morphemes.len(), 1);
        assert_eq!(stream.remaining(), 1);
    }

    #[test]
    fn test_non_noun_context_stops() {
        let aruku = word_token("歩く", "動詞", "アルク", "アルク", "2");
        let hashiru = word_token("走る", "動詞", "ハシル", "ハシル", "2");
        let mut stream = TokenStream::new([aruku, hashiru]);
        let morphemes = Morpheme::parse_multiple(&mut stream, &empty_dict());
        assert_eq!(morphemes.len(), 1);
        assert_eq!(stream.remaining(), 1);
    }

    #[test]
    fn test_numeral_classifier_merges() {
        let san = token_with("三", &[(0, "名詞"), (1, "数詞"), (9, "サン"), (20, "サン")]);
        let bon = token_with(
            "本",
            &[(0, "名詞"), (1, "普通名詞"), (2, "助数詞可能"), (9, "ホン"), (20, "ホン")],
        );
        let mut stream = TokenStream::new([san, bon]);
        let morphemes = Morpheme::parse_multiple(&mut stream, &empty_dict());
        assert_eq!(morphemes.len(), 1);
        assert_eq!(morphemes[0].surface(), "三本");
    }

    #[test]
    fn test_malformed_empty_pronunciation_stops() {
        // 表層発音が空になる不正なエントリでは伝播させずに停止する
        let broken = token_with("", &[(0, "名詞")]);
        let inu = word_token("犬", "名詞", "イヌ", "イヌ", "2");
        let mut stream = TokenStream::new([broken, inu]);
        let morphemes = Morpheme::parse_multiple(&mut stream, &empty_dict());
        assert_eq!(morphemes.len(), 1);
        assert_eq!(stream.remaining(), 1);
    }
}
