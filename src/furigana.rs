//! ふりがな（ルビ）生成器
//!
//! このモジュールは、表層形と表層発音をアラインメントエンジンで文字
//! 単位に対応付け、漢字にかかる区間（ふりがなが必要）と送りがな区間
//! （表記どおりに発音されるかな）に分割してルビマークアップを生成
//! します。
//!
//! 表層形をカタカナに転写したものと表層発音を比較するため、かなの
//! 位置は一致として、漢字の位置は不一致・ギャップとして現れます。
//! 両側が存在し等しい位置は送りがな、どちらかがギャップまたは異なる
//! 位置はふりがなに分類され、同型の隣接位置は1つの区間に伸長されます。
//!
//! 送りがな区間も空の読みを持つ `<ruby>` タグとして出力されるため、
//! クライアント側の描画は一様に保たれます。

use crate::align::{align_chars, Match};
use crate::kana::{hiragana_to_katakana, katakana_to_hiragana};
use crate::token::PLACEHOLDER;

/// アラインメント済み区間の分類
#[derive(Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    /// 読みの注釈が必要な区間（漢字にかかる）
    Furigana,
    /// 表記どおりに発音される区間（読み注釈は不要）
    Okurigana,
}

/// 表層形と表層発音からルビマークアップを生成します
///
/// 次の場合は注釈なしの表層形をそのまま返します:
///
/// - カタカナ転写した表層形が表層発音と一致する
/// - ふりがな非表示フラグが立っている
/// - 表層発音が空またはプレースホルダ
///
/// それ以外の場合、ふりがな区間は読み（ひらがな正規化済み）付きの
/// `<ruby>` スパンとして、送りがな区間は空の読みを持つ `<ruby>`
/// スパンとして、元の左から右の順に連結されます。
///
/// # 引数
///
/// * `surface` - 元の表層形
/// * `surface_pronunciation` - 表層発音（カタカナ）
/// * `hide_furigana` - ふりがなを常に隠すかどうか
///
/// # 例
///
/// ```
/// # use yomigana::furigana::ruby_spans;
/// let ruby = ruby_spans("使う", "ツカウ", false);
/// assert_eq!(ruby, "<ruby>使<rt>つか</rt></ruby><ruby>う<rt></rt></ruby>");
/// ```
pub fn ruby_spans(surface: &str, surface_pronunciation: &str, hide_furigana: bool) -> String {
    let katakana_surface = hiragana_to_katakana(surface);
    if hide_furigana
        || surface_pronunciation.is_empty()
        || surface_pronunciation == PLACEHOLDER
        || katakana_surface == surface_pronunciation
    {
        return surface.to_string();
    }

    let (aligned_surface, aligned_pron) =
        match align_chars(&katakana_surface, surface_pronunciation) {
            Ok(streams) => streams,
            Err(e) => {
                log::error!("furigana alignment failed: {e}");
                return surface.to_string();
            }
        };

    let surface_chars: Vec<char> = surface.chars().collect();
    let mut spans = String::new();
    let mut current: Option<(SpanKind, String, String)> = None;
    for (s, p) in aligned_surface.iter().zip(&aligned_pron) {
        let kind = match (s, p) {
            (Match::Indexed(_, sc), Match::Indexed(_, pc)) if sc == pc => SpanKind::Okurigana,
            _ => SpanKind::Furigana,
        };
        // 元の表層形の文字はカタカナ転写前のものを使う（転写は1文字
        // 対1文字なので元インデックスで引き直せる）
        let surface_char = s.index().map(|i| surface_chars[i]);
        let pron_char = p.value().copied();

        match current.as_mut() {
            Some((span_kind, span_surface, span_reading)) if *span_kind == kind => {
                span_surface.extend(surface_char);
                span_reading.extend(pron_char);
            }
            _ => {
                if let Some(span) = current.take() {
                    flush_span(&mut spans, span);
                }
                let mut span_surface = String::new();
                span_surface.extend(surface_char);
                let mut span_reading = String::new();
                span_reading.extend(pron_char);
                current = Some((kind, span_surface, span_reading));
            }
        }
    }
    if let Some(span) = current.take() {
        flush_span(&mut spans, span);
    }
    spans
}

fn flush_span(out: &mut String, (kind, surface, reading): (SpanKind, String, String)) {
    match kind {
        SpanKind::Furigana => {
            let reading = katakana_to_hiragana(&reading);
            out.push_str("<ruby>");
            out.push_str(&surface);
            out.push_str("<rt>");
            out.push_str(&reading);
            out.push_str("</rt></ruby>");
        }
        SpanKind::Okurigana => {
            out.push_str("<ruby>");
            out.push_str(&surface);
            out.push_str("<rt></rt></ruby>");
        }
    }
}
