//! 文の構築
//!
//! 文は文末句読点で区切られたアクセント句の順序付き列です。文の解析は
//! 分割済みセグメントごとに独立して行われ、セグメント間に共有状態は
//! ありません。

use crate::dictionary::Dictionary;
use crate::phrase::AccentPhrase;
use crate::token::RawToken;
use crate::tokenizer::TokenStream;

/// アクセント句の順序付き列からなる文
#[derive(Clone, Debug)]
pub struct Sentence {
    phrases: Vec<AccentPhrase>,
}

impl Sentence {
    /// トークンカーソルから1つの文を解析します
    ///
    /// 文境界に到達するかトークンが尽きるまでアクセント句を積み上げ、
    /// 末尾の文末句読点の連続を消費します。句が1つも得られなければ
    /// `None` を返します（句読点のみの入力など）。
    pub fn parse<D>(stream: &mut TokenStream, dict: &D) -> Option<Self>
    where
        D: Dictionary + ?Sized,
    {
        let mut phrases = vec![];
        while let Some(phrase) = AccentPhrase::parse(stream, dict) {
            phrases.push(phrase);
            if stream
                .peek()
                .is_some_and(RawToken::is_sentence_boundary)
            {
                break;
            }
        }
        // 文末句読点の連続を読み捨てる。先頭が句読点でなければ
        // ExpectFailed だが、それは「この文に句読点がない」だけのこと。
        let _ = stream.consume_while(RawToken::is_sentence_boundary, "sentence-ending punctuation");

        if phrases.is_empty() {
            None
        } else {
            Some(Self { phrases })
        }
    }

    /// アクセント句の列を取得します
    #[inline(always)]
    pub fn phrases(&self) -> &[AccentPhrase] {
        &self.phrases
    }
}
