//! エラー型の定義
//!
//! このモジュールは、yomiganaライブラリで使用されるすべてのエラー型を定義します。
//!
//! トークナイザーの消費エラー（[`RanOutOfInputError`]）と述語付き消費の失敗
//! （[`ExpectFailedError`]）は制御フローの一部として扱われます。後者は
//! 「この規則は適用されない」というソフトな信号であり、呼び出し側は次の
//! 規則を試すべきです。プログラムエラーとして扱ってはいけません。

use std::error::Error;
use std::fmt;

/// yomigana専用のResult型
///
/// エラー型としてデフォルトで[`YomiganaError`]を使用します。
pub type Result<T, E = YomiganaError> = std::result::Result<T, E>;

/// yomiganaのエラー型
///
/// このライブラリで発生する可能性のあるすべてのエラーを表現します。
#[derive(Debug, thiserror::Error)]
pub enum YomiganaError {
    /// トークンの残りが要求数に満たないエラー
    ///
    /// [`RanOutOfInputError`]のエラーバリアント。現在のセグメントの解析に
    /// とって致命的であり、セグメントは完了済みの文のみを返します。
    #[error(transparent)]
    RanOutOfInput(RanOutOfInputError),

    /// 述語付き消費が一致しなかったエラー
    ///
    /// [`ExpectFailedError`]のエラーバリアント。内部的なソフト制御フロー
    /// 信号として使用されます。
    #[error(transparent)]
    ExpectFailed(ExpectFailedError),

    /// 無効な引数エラー
    ///
    /// [`InvalidArgumentError`]のエラーバリアント。
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// バックグラウンドスレッドパニックエラー
    ///
    /// セグメントワーカーまたはアラインメントワーカーがパニックした場合に
    /// 発生します。
    #[error("Background thread panicked: {0}")]
    ThreadPanic(String),
}

impl YomiganaError {
    /// 入力不足エラーを生成します
    ///
    /// # 引数
    ///
    /// * `requested` - 要求されたトークン数
    /// * `remaining` - 実際に残っていたトークン数
    pub(crate) const fn ran_out_of_input(requested: usize, remaining: usize) -> Self {
        Self::RanOutOfInput(RanOutOfInputError {
            requested,
            remaining,
        })
    }

    /// 述語不一致エラーを生成します
    ///
    /// # 引数
    ///
    /// * `msg` - どの代替規則が適用されなかったかを示すメッセージ
    pub(crate) fn expect_failed<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::ExpectFailed(ExpectFailedError { msg: msg.into() })
    }

    /// 無効な引数エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 引数の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }
}

/// 要求されたトークン数が残りより多い場合に使用されるエラー
#[derive(Debug)]
pub struct RanOutOfInputError {
    /// 要求されたトークン数
    pub(crate) requested: usize,

    /// 残っていたトークン数
    pub(crate) remaining: usize,
}

impl RanOutOfInputError {
    /// 要求されたトークン数を返します
    #[inline(always)]
    pub const fn requested(&self) -> usize {
        self.requested
    }

    /// 残っていたトークン数を返します
    #[inline(always)]
    pub const fn remaining(&self) -> usize {
        self.remaining
    }
}

impl fmt::Display for RanOutOfInputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "RanOutOfInputError: requested {} tokens, but only {} remain",
            self.requested, self.remaining
        )
    }
}

impl Error for RanOutOfInputError {}

/// 述語付き消費が一致しなかった場合に使用されるエラー
///
/// このエラーを受け取った呼び出し側は、次の代替規則を試すべきです。
#[derive(Debug)]
pub struct ExpectFailedError {
    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for ExpectFailedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ExpectFailedError: {}", self.msg)
    }
}

impl Error for ExpectFailedError {}

/// 引数が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// 引数の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}
