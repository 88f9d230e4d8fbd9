//! 例外リゾルバのパイプライン
//!
//! 各リゾルバはトークンストリームの状態のみに依存する純粋な補正関数で、
//! 次トークン・次々トークンの語彙素IDを検査し、
//!
//! - 先頭の2トークンを素性単位の連結で1つに結合して先頭に差し戻す、
//! - 先頭トークンのフィールド（読み・アクセント数字・ふりがな非表示
//!   フラグ）を語彙素IDの完全一致と限られた先読みに基づいて書き換える、
//!
//! のいずれかを行います。対象は列挙可能な少数の語彙素エントリに限られ
//! ます。パイプラインの順序は固定で、後段のリゾルバは前段の変更を同じ
//! パス内で観測します。

use crate::tokenizer::TokenStream;

/// 係助詞「は」の語彙素ID。発音は表記と異なり「ワ」になる。
const TOPIC_PARTICLE_WA: &str = "29321";
/// 格助詞「へ」の語彙素ID。発音は表記と異なり「エ」になる。
const DIRECTIONAL_PARTICLE_E: &str = "27921";
/// 接続助詞「て」の語彙素ID。
const CONJUNCTIVE_TE: &str = "21599";
/// 接続助詞「で」の語彙素ID。
const CONJUNCTIVE_DE: &str = "22839";
/// 補助動詞「しまう」の語彙素ID。
const AUXILIARY_SHIMAU: &str = "16977";
/// 助動詞「だ」の語彙素ID。連用形の表層形は「で」になる。
const AUXILIARY_DA: &str = "22916";
/// 動詞「あり」の語彙素ID。
const VERB_ARI: &str = "13198";
/// 助数詞「ヶ月」の語彙素ID。かなスロットが「ヶ月」のまま残る。
const COUNTER_KAGETSU: &str = "12105";

/// 先頭の2トークンを結合すべき語彙素IDの組
///
/// 「て/で＋しまう」の縮約形（〜ちゃう・〜じゃう）は後続の活用情報
/// なしでは読みを復元できないため、1トークンに結合してから扱います。
/// 「だ＋あり」はコピュラ連結「であり」が2トークンに分割される列で、
/// 同様に結合してから扱います。
const MERGE_PAIRS: &[(&str, &str)] = &[
    (CONJUNCTIVE_TE, AUXILIARY_SHIMAU),
    (CONJUNCTIVE_DE, AUXILIARY_SHIMAU),
    (AUXILIARY_DA, VERB_ARI),
];

/// 固定順のリゾルバパイプライン
///
/// 結合系のリゾルバが先に実行され、素性書き換え系のリゾルバは結合後の
/// 先頭トークンを観測します。
pub(crate) const PIPELINE: &[fn(&mut TokenStream)] = &[
    resolve_auxiliary_contraction,
    resolve_counter_month,
    resolve_topic_particle,
    resolve_directional_particle,
];

/// 補助動詞の縮約列を1トークンに結合します
///
/// 先頭2トークンのIDが [`MERGE_PAIRS`] のいずれかに一致した場合、
/// 表層形と読み・発音系スロット（素性6〜11と20〜23）を連結した
/// 1トークンを先頭に差し戻します。
fn resolve_auxiliary_contraction(stream: &mut TokenStream) {
    let pair_ids = match (stream.peek(), stream.peek_next()) {
        (Some(head), Some(next)) => (head.lexicon_id().to_string(), next.lexicon_id().to_string()),
        _ => return,
    };
    let is_merge_pair = MERGE_PAIRS
        .iter()
        .any(|&(a, b)| a == pair_ids.0 && b == pair_ids.1);
    if !is_merge_pair {
        return;
    }
    let Ok(pair) = stream.consume_n(2) else { return };
    stream.push_front(pair[0].merged_with(&pair[1]));
}

/// 数詞に付属する「ヶ月」の読みを補正します
///
/// 先頭が数詞で次が助数詞「ヶ月」の場合、かなスロットに表記のまま
/// 残っている読みを「カゲツ」に書き換え、アクセントを平板に設定します。
fn resolve_counter_month(stream: &mut TokenStream) {
    let applies = stream.peek().is_some_and(|head| head.is_numeral())
        && stream
            .peek_next()
            .is_some_and(|next| next.lexicon_id() == COUNTER_KAGETSU);
    if !applies {
        return;
    }
    if let Some(counter) = stream.get_mut(1) {
        counter.set_kana_reading("カゲツ");
        counter.set_accent_digits("0");
    }
}

/// 係助詞「は」の発音を「ワ」に強制します
///
/// 表記と発音が乖離する代表例であり、ふりがなは常に非表示にします。
fn resolve_topic_particle(stream: &mut TokenStream) {
    if let Some(head) = stream.peek_mut() {
        if head.lexicon_id() == TOPIC_PARTICLE_WA {
            head.force_pronunciation("ワ");
            head.set_hide_furigana(true);
        }
    }
}

/// 格助詞「へ」の発音を「エ」に強制します
fn resolve_directional_particle(stream: &mut TokenStream) {
    if let Some(head) = stream.peek_mut() {
        if head.lexicon_id() == DIRECTIONAL_PARTICLE_E {
            head.force_pronunciation("エ");
            head.set_hide_furigana(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::token_with;
    use crate::tokenizer::TokenStream;

    #[test]
    fn test_topic_particle_forced_to_wa() {
        let wa = token_with("は", &[(0, "助詞"), (9, "ハ"), (20, "ハ"), (28, "29321")]);
        let mut stream = TokenStream::new([wa]);
        stream.apply_resolvers();
        let head = stream.peek().unwrap();
        assert_eq!(head.surface_pronunciation(), "ワ");
        assert!(head.hide_furigana());
    }

    #[test]
    fn test_directional_particle_forced_to_e() {
        let e = token_with("へ", &[(0, "助詞"), (9, "ヘ"), (28, "27921")]);
        let mut stream = TokenStream::new([e]);
        stream.apply_resolvers();
        let head = stream.peek().unwrap();
        assert_eq!(head.surface_pronunciation(), "エ");
        assert!(head.hide_furigana());
    }

    #[test]
    fn test_other_tokens_untouched() {
        let noun = token_with("東京", &[(0, "名詞"), (9, "トーキョー"), (28, "100")]);
        let mut stream = TokenStream::new([noun]);
        stream.apply_resolvers();
        let head = stream.peek().unwrap();
        assert_eq!(head.surface_pronunciation(), "トーキョー");
        assert!(!head.hide_furigana());
    }

    #[test]
    fn test_auxiliary_contraction_merged() {
        let te = token_with("て", &[(0, "助詞"), (9, "テ"), (20, "テ"), (28, "21599")]);
        let shimau = token_with(
            "しまう",
            &[(0, "動詞"), (9, "シマウ"), (20, "シマウ"), (28, "16977")],
        );
        let mut stream = TokenStream::new([te, shimau]);
        stream.apply_resolvers();
        assert_eq!(stream.remaining(), 1);
        let merged = stream.peek().unwrap();
        assert_eq!(merged.surface(), "てしまう");
        assert_eq!(merged.surface_pronunciation(), "テシマウ");
        assert_eq!(merged.reading(), "テシマウ");
    }

    #[test]
    fn test_copular_sequence_merged() {
        // であり: 助動詞「だ」の連用形 + 動詞「あり」の2トークン列
        let de = token_with(
            "で",
            &[(0, "助動詞"), (7, "だ"), (9, "デ"), (20, "デ"), (28, "22916")],
        );
        let ari = token_with(
            "あり",
            &[(0, "動詞"), (7, "ある"), (9, "アリ"), (20, "アリ"), (28, "13198")],
        );
        let mut stream = TokenStream::new([de, ari]);
        stream.apply_resolvers();
        assert_eq!(stream.remaining(), 1);
        let merged = stream.peek().unwrap();
        assert_eq!(merged.surface(), "であり");
        assert_eq!(merged.surface_pronunciation(), "デアリ");
        assert_eq!(merged.reading(), "デアリ");
    }

    #[test]
    fn test_counter_month_reading_rewritten() {
        let three = token_with("三", &[(0, "名詞"), (1, "数詞"), (9, "サン")]);
        let kagetsu = token_with("ヶ月", &[(0, "接尾辞"), (20, "ヶ月"), (28, "12105")]);
        let mut stream = TokenStream::new([three, kagetsu]);
        stream.apply_resolvers();
        assert_eq!(stream.remaining(), 2);
        let counter = stream.peek_next().unwrap();
        assert_eq!(counter.reading(), "カゲツ");
        assert_eq!(counter.pitch_accents()[0].mora, 0);
    }

    #[test]
    fn test_pipeline_runs_all_resolvers_in_one_pass() {
        // 結合リゾルバの出力（先頭の縮約トークン）は、同じパス内の
        // 後段リゾルバの観測対象になる。
        let te = token_with("て", &[(0, "助詞"), (9, "テ"), (28, "21599")]);
        let shimau = token_with("しまう", &[(0, "動詞"), (9, "シマウ"), (28, "16977")]);
        let wa = token_with("は", &[(0, "助詞"), (9, "ハ"), (28, "29321")]);
        let mut stream = TokenStream::new([te, shimau, wa]);

        stream.apply_resolvers();
        assert_eq!(stream.remaining(), 2);
        assert_eq!(stream.peek().unwrap().surface(), "てしまう");

        // 次の消費の前に再度パイプラインが走り、「は」が補正される
        stream.consume();
        stream.apply_resolvers();
        let head = stream.peek().unwrap();
        assert_eq!(head.surface_pronunciation(), "ワ");
        assert!(head.hide_furigana());
    }
}
