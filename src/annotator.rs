//! 注釈パイプラインの並列ドライバ
//!
//! このモジュールは、語彙素解析器が出力したトークン列を文境界で独立な
//! セグメントに分割し、セグメントごとにワーカースレッドで形態素統合・
//! アクセント句構築を実行して、結果を元の順序で連結します。
//!
//! セグメントは互いのトークンカーソルの状態を参照しないため、ロックは
//! 不要です。辞書への照会は読み取り専用であり、複数のワーカーから並行
//! に呼び出されます。1つのセグメントの失敗（パニックを含む）は分離
//! され、兄弟セグメントを中断させません。

use crate::dictionary::Dictionary;
use crate::sentence::Sentence;
use crate::token::RawToken;
use crate::tokenizer::TokenStream;

/// トークン列を文（アクセント句・ピッチアクセント注釈付き）に変換する
/// アノテータ
///
/// 外部辞書を保持し、[`annotate`] の呼び出しごとにセグメント並列で
/// 解析を行います。
///
/// [`annotate`]: Self::annotate
///
/// # 例
///
/// ```
/// use yomigana::{Annotator, HashSetDictionary, RawToken};
///
/// let dict = HashSetDictionary::default();
/// let annotator = Annotator::new(dict);
/// let tokens = vec![
///     RawToken::from_csv("犬", "名詞,普通名詞,*,*,*,*,イヌ,犬,犬,イヌ,*,*,*,*,*,*,*,*,*,*,イヌ,イヌ,*,*,2"),
/// ];
/// let sentences = annotator.annotate(tokens);
/// assert_eq!(sentences.len(), 1);
/// ```
pub struct Annotator<D> {
    dict: D,
}

impl<D> Annotator<D>
where
    D: Dictionary,
{
    /// 外部辞書からアノテータを生成します
    pub const fn new(dict: D) -> Self {
        Self { dict }
    }

    /// 保持している辞書への参照を取得します
    #[inline(always)]
    pub fn dictionary(&self) -> &D {
        &self.dict
    }

    /// トークン列を解析して文の列を返します
    ///
    /// トークン列は文境界で独立なセグメントに分割され、セグメントごと
    /// にスコープ付きワーカースレッドで処理されます。結果は単純な順序
    /// 付き連結で合流します。パニックしたセグメントの文は破棄され、
    /// エラーログに報告されますが、他のセグメントには影響しません。
    pub fn annotate(&self, tokens: Vec<RawToken>) -> Vec<Sentence> {
        let segments = split_segments(tokens);
        let dict = &self.dict;
        if segments.len() <= 1 {
            return segments
                .into_iter()
                .flat_map(|segment| process_segment(segment, dict))
                .collect();
        }
        std::thread::scope(|scope| {
            let handles: Vec<_> = segments
                .into_iter()
                .map(|segment| scope.spawn(move || process_segment(segment, dict)))
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        log::error!("segment worker panicked; dropping its sentences");
                        vec![]
                    })
                })
                .collect()
        })
    }
}

/// トークン列を文境界で独立なセグメントに分割します
///
/// 境界トークンの連続は直前のセグメントに含めて閉じます。境界のない
/// 末尾の残りも1つのセグメントになります。
fn split_segments(tokens: Vec<RawToken>) -> Vec<Vec<RawToken>> {
    let mut segments = vec![];
    let mut current: Vec<RawToken> = vec![];
    let mut tokens = tokens.into_iter().peekable();
    while let Some(token) = tokens.next() {
        let closes_segment = token.is_sentence_boundary()
            && !tokens.peek().is_some_and(RawToken::is_sentence_boundary);
        current.push(token);
        if closes_segment {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// 1セグメントを解析します
///
/// セグメントの解析が途中で止まった場合（進捗のない不正入力）は、
/// 完了済みの文のみを返します。
fn process_segment<D>(tokens: Vec<RawToken>, dict: &D) -> Vec<Sentence>
where
    D: Dictionary + ?Sized,
{
    let mut stream = TokenStream::new(tokens);
    let mut sentences = vec![];
    while !stream.at_end() {
        let before = stream.remaining();
        if let Some(sentence) = Sentence::parse(&mut stream, dict) {
            sentences.push(sentence);
        }
        if stream.remaining() == before {
            log::error!("segment made no progress; yielding completed sentences only");
            break;
        }
    }
    sentences
}
