//! テスト用の共有フィクスチャ

use crate::token::RawToken;

/// 指定スロットのみを埋めた生トークンを生成する
pub(crate) fn token_with(surface: &str, slots: &[(usize, &str)]) -> RawToken {
    let mut token = RawToken::new(surface, std::iter::empty::<&str>());
    for &(index, value) in slots {
        token.set_feature(index, value);
    }
    token
}

/// 内容語トークン（品詞・かな読み・発音・アクセント数字付き）を生成する
pub(crate) fn word_token(
    surface: &str,
    pos: &str,
    kana: &str,
    pron: &str,
    accent: &str,
) -> RawToken {
    token_with(
        surface,
        &[(0, pos), (7, surface), (9, pron), (20, kana), (24, accent)],
    )
}

/// 文末の句点トークンを生成する
pub(crate) fn period_token() -> RawToken {
    token_with("。", &[(0, "補助記号"), (1, "句点")])
}
