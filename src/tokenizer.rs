//! 先読み付きトークンカーソル
//!
//! このモジュールは、生トークン列に対する消費・先読みカーソル
//! （[`TokenStream`]）を提供します。形態素レベルの各消費の前には、
//! 固定順の例外リゾルバのパイプライン（[`resolvers`]）がカーソルに
//! 対して実行されます。
//!
//! 一部の屈折形・縮約形（助動詞の連続列、助数詞の数詞への付属、特定の
//! 語彙素エントリ）は単一トークンの情報からは補正できず、複数トークン
//! の文脈に基づいてバッファ内のトークンを書き換える必要があります。
//! リゾルバはその短い列挙可能な集合を特別扱いするための機構です。
//!
//! カーソルは1つのセグメントを処理する単一の論理パスが排他的に所有し、
//! リゾルバはその所有バッファのみを変更します。セグメントをまたぐ共有
//! 状態はありません。

pub(crate) mod resolvers;

use std::collections::VecDeque;

use crate::errors::{Result, YomiganaError};
use crate::token::RawToken;

/// 生トークン列に対する消費・先読みカーソル
///
/// 先頭からの消費（`consume`系）と、先頭および2番目のトークンの先読み
/// （[`peek`]/[`peek_next`]）を提供します。
///
/// [`peek`]: Self::peek
/// [`peek_next`]: Self::peek_next
#[derive(Debug, Default)]
pub struct TokenStream {
    buf: VecDeque<RawToken>,
}

impl TokenStream {
    /// トークンのイテレータからカーソルを生成します
    pub fn new<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = RawToken>,
    {
        Self {
            buf: tokens.into_iter().collect(),
        }
    }

    /// 先頭のトークンを参照します
    #[inline(always)]
    pub fn peek(&self) -> Option<&RawToken> {
        self.buf.front()
    }

    /// 2番目のトークンを参照します
    #[inline(always)]
    pub fn peek_next(&self) -> Option<&RawToken> {
        self.buf.get(1)
    }

    /// トークンが尽きたかどうかを判定します
    #[inline(always)]
    pub fn at_end(&self) -> bool {
        self.buf.is_empty()
    }

    /// 残りのトークン数を返します
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    /// 先頭のトークンを消費します
    ///
    /// トークンが尽きていれば `None` を返します。
    #[inline(always)]
    pub fn consume(&mut self) -> Option<RawToken> {
        self.buf.pop_front()
    }

    /// 先頭から指定数のトークンを消費します
    ///
    /// # エラー
    ///
    /// 残りが `times` に満たなければ `RanOutOfInput` を返し、バッファは
    /// 変更されません。
    pub fn consume_n(&mut self, times: usize) -> Result<Vec<RawToken>> {
        if self.buf.len() < times {
            return Err(YomiganaError::ran_out_of_input(times, self.buf.len()));
        }
        Ok(self.buf.drain(..times).collect())
    }

    /// 述語が一致する間、先頭からトークンを消費します
    ///
    /// # エラー
    ///
    /// バッファが空、または先頭のトークンが述語に一致しない場合は
    /// `ExpectFailed` を返します。このエラーは「この代替規則は適用され
    /// ない」というソフトな信号であり、呼び出し側は次の規則を試すべき
    /// です。
    pub fn consume_while<P>(&mut self, pred: P, expectation: &str) -> Result<Vec<RawToken>>
    where
        P: Fn(&RawToken) -> bool,
    {
        match self.buf.front() {
            Some(head) if pred(head) => {}
            _ => return Err(YomiganaError::expect_failed(expectation.to_string())),
        }
        let mut consumed = vec![];
        while let Some(head) = self.buf.front() {
            if !pred(head) {
                break;
            }
            consumed.push(self.buf.pop_front().unwrap());
        }
        Ok(consumed)
    }

    /// 形態素レベルの消費の前に例外リゾルバのパイプラインを実行します
    ///
    /// リゾルバは固定順で実行されます。後段のリゾルバは前段が同じパスで
    /// 行った変更を観測するため、順序に意味があります。
    pub fn apply_resolvers(&mut self) {
        for resolve in resolvers::PIPELINE {
            resolve(self);
        }
    }

    /// バッファ内のトークンを先頭から順に走査します
    ///
    /// 最長一致探索の先読みに使用されます。消費は行いません。
    #[inline(always)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &RawToken> {
        self.buf.iter()
    }

    /// 先頭のトークンへの可変参照を返します（リゾルバ専用）
    #[inline(always)]
    pub(crate) fn peek_mut(&mut self) -> Option<&mut RawToken> {
        self.buf.front_mut()
    }

    /// 指定位置のトークンへの可変参照を返します（リゾルバ専用）
    #[inline(always)]
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut RawToken> {
        self.buf.get_mut(index)
    }

    /// トークンを先頭に差し戻します（リゾルバ専用）
    #[inline(always)]
    pub(crate) fn push_front(&mut self, token: RawToken) {
        self.buf.push_front(token);
    }
}
