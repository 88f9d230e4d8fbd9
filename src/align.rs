//! 汎用の大域系列アラインメントエンジン
//!
//! このモジュールは、等価比較可能な任意の要素系列対に対する最小編集
//! 距離の大域アラインメントを提供します。結果は2本の等長の出力ストリーム
//! で、各位置は元インデックス付きの実要素（[`Match::Indexed`]）または
//! ギャップ（[`Match::Missing`]）です。
//!
//! # アルゴリズム
//!
//! 線形空間の分割統治（Hirschberg法）を使用します。系列1を中点で分割し、
//! 先頭から中点までの前向きDPコスト行と、末尾から中点までの後ろ向きDP
//! コスト行を、それぞれ2本の単一行作業バッファの再利用で計算します
//! （完全なO(n·m)行列は構築しません）。系列2側の分割列は、前向きと
//! 後ろ向きのコスト和を最小にする列として選択されます。前向き・後ろ向き
//! の行計算は互いに依存しないため、2つのスコープ付きスレッドで並行に
//! 実行され、分割列の選択前に合流します。
//!
//! 再帰深度は `log2(max(n1,n2))` で抑えられます。非常に大きな入力に
//! 対するコスト上限が必要な呼び出し側は、エンジン呼び出し前に外部で
//! 入力を分割してください（チャンク化・窓付きアラインメントはこの
//! エンジンの責務外です）。
//!
//! アラインメント前には、両系列の相異なる要素を最小の固定幅整数に
//! 写像するアルファベット圧縮（[`compress`]サブモジュール）が適用
//! されます。

pub(crate) mod compress;

use std::hash::Hash;

use crate::align::compress::{compress, CompressedPair};
use crate::errors::{Result, YomiganaError};

/// ふりがな生成の較正スコア: 一致
pub const DEFAULT_MATCH_SCORE: i32 = 10;
/// ふりがな生成の較正スコア: 置換
pub const DEFAULT_SUBSTITUTION_SCORE: i32 = -3;
/// ふりがな生成の較正スコア: ギャップ
pub const DEFAULT_GAP_SCORE: i32 = -2;

/// 分割ごとのスレッド起動が割に合う系列2の最小長。
const PARALLEL_ROW_THRESHOLD: usize = 64;

/// アラインメント出力の1位置
///
/// 実要素の場合は元系列におけるインデックスと値を保持します。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Match<T> {
    /// 元インデックス付きの実要素
    Indexed(usize, T),
    /// ギャップ（相手側の挿入・削除に対応）
    Missing,
}

impl<T> Match<T> {
    /// 実要素ならその値を返します
    #[inline(always)]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Indexed(_, value) => Some(value),
            Self::Missing => None,
        }
    }

    /// 実要素なら元系列におけるインデックスを返します
    #[inline(always)]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Indexed(index, _) => Some(*index),
            Self::Missing => None,
        }
    }

    /// ギャップかどうかを判定します
    #[inline(always)]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// 正規化済みの単位コスト。一致は常に0。
#[derive(Clone, Copy)]
struct Costs {
    substitution: u32,
    gap: u32,
}

/// 2系列の大域アラインメントを計算します
///
/// スコアは「高いほど安い」流儀で与えます（例: 一致10・置換-3・
/// ギャップ-2）。内部では一致を0とする正のコストに正規化されるため、
/// 一致スコアは置換・ギャップスコアより厳密に大きい必要があります。
///
/// # 引数
///
/// * `seq1`, `seq2` - アラインメント対象の系列
/// * `match_score` - 一致のスコア
/// * `substitution_score` - 置換のスコア
/// * `gap_score` - ギャップのスコア
///
/// # 戻り値
///
/// 2本の等長の出力ストリーム。位置ごとに、少なくとも一方が実要素です。
/// 非ギャップ要素は元系列の相対順序を保ち、各元インデックスはちょうど
/// 1回現れます。
///
/// # エラー
///
/// スコアの順序が `match > substitution` かつ `match > gap` を満たさない
/// 場合は `InvalidArgument` を返します。
///
/// # 例
///
/// ```
/// # use yomigana::align::{align, Match};
/// let a: Vec<char> = "使ウ".chars().collect();
/// let b: Vec<char> = "ツカウ".chars().collect();
/// let (out1, out2) = align(&a, &b, 10, -3, -2).unwrap();
/// assert_eq!(out1.len(), out2.len());
/// ```
pub fn align<T>(
    seq1: &[T],
    seq2: &[T],
    match_score: i32,
    substitution_score: i32,
    gap_score: i32,
) -> Result<(Vec<Match<T>>, Vec<Match<T>>)>
where
    T: Eq + Hash + Clone,
{
    if match_score <= substitution_score || match_score <= gap_score {
        return Err(YomiganaError::invalid_argument(
            "match_score",
            "the match score must be strictly greater than the substitution and gap scores",
        ));
    }
    let costs = Costs {
        substitution: (match_score - substitution_score) as u32,
        gap: (match_score - gap_score) as u32,
    };

    let mut pairs = Vec::with_capacity(seq1.len().max(seq2.len()));
    match compress(seq1, seq2) {
        CompressedPair::W8(a, b) => solve(&a, &b, 0, 0, costs, &mut pairs)?,
        CompressedPair::W16(a, b) => solve(&a, &b, 0, 0, costs, &mut pairs)?,
        CompressedPair::W32(a, b) => solve(&a, &b, 0, 0, costs, &mut pairs)?,
        CompressedPair::W64(a, b) => solve(&a, &b, 0, 0, costs, &mut pairs)?,
    }

    let mut out1 = Vec::with_capacity(pairs.len());
    let mut out2 = Vec::with_capacity(pairs.len());
    for (i, j) in pairs {
        out1.push(i.map_or(Match::Missing, |i| Match::Indexed(i, seq1[i].clone())));
        out2.push(j.map_or(Match::Missing, |j| Match::Indexed(j, seq2[j].clone())));
    }
    Ok((out1, out2))
}

/// 文字列対を文字系列として較正スコアでアラインメントします
///
/// ふりがな生成器と外部の原稿同期コントローラが共有するエントリ
/// ポイントです。
pub fn align_chars(text1: &str, text2: &str) -> Result<(Vec<Match<char>>, Vec<Match<char>>)> {
    let chars1: Vec<char> = text1.chars().collect();
    let chars2: Vec<char> = text2.chars().collect();
    align(
        &chars1,
        &chars2,
        DEFAULT_MATCH_SCORE,
        DEFAULT_SUBSTITUTION_SCORE,
        DEFAULT_GAP_SCORE,
    )
}

/// 圧縮済みコード系列に対する分割統治の本体
///
/// `out` にはアラインメントされたインデックス対が、元系列の左から右の
/// 順で追記されます。`a_off`/`b_off` は現在の部分問題の元系列における
/// 開始位置です。
fn solve<C>(
    a: &[C],
    b: &[C],
    a_off: usize,
    b_off: usize,
    costs: Costs,
    out: &mut Vec<(Option<usize>, Option<usize>)>,
) -> Result<()>
where
    C: Copy + Eq + Send + Sync,
{
    if a.is_empty() {
        out.extend((0..b.len()).map(|j| (None, Some(b_off + j))));
        return Ok(());
    }
    if b.is_empty() {
        out.extend((0..a.len()).map(|i| (Some(a_off + i), None)));
        return Ok(());
    }
    if a.len() == 1 {
        place_single(a[0], b, costs, |j| (Some(a_off), Some(b_off + j)), |j| {
            (None, Some(b_off + j))
        }, (Some(a_off), None), out);
        return Ok(());
    }
    if b.len() == 1 {
        place_single(b[0], a, costs, |i| (Some(a_off + i), Some(b_off)), |i| {
            (Some(a_off + i), None)
        }, (None, Some(b_off)), out);
        return Ok(());
    }

    let mid = a.len() / 2;
    let (a_lo, a_hi) = a.split_at(mid);
    let (fwd, bwd) = if b.len() >= PARALLEL_ROW_THRESHOLD {
        std::thread::scope(|scope| {
            let fwd_handle = scope.spawn(|| forward_row(a_lo, b, costs));
            let bwd = backward_row(a_hi, b, costs);
            let fwd = fwd_handle
                .join()
                .map_err(|_| YomiganaError::ThreadPanic("forward DP row".to_string()))?;
            Ok::<_, YomiganaError>((fwd, bwd))
        })?
    } else {
        (forward_row(a_lo, b, costs), backward_row(a_hi, b, costs))
    };

    // 前向きと後ろ向きのコスト和が最小になる列で系列2を分割する。
    // 同点は後方の列を採用する。
    let mut split = 0;
    let mut best = u32::MAX;
    for k in 0..=b.len() {
        let total = fwd[k].saturating_add(bwd[k]);
        if total <= best {
            best = total;
            split = k;
        }
    }

    solve(a_lo, &b[..split], a_off, b_off, costs, out)?;
    solve(a_hi, &b[split..], a_off + mid, b_off + split, costs, out)
}

/// 前向きDPコスト行を計算します
///
/// 戻り値の第k要素は、`a` 全体と `b` の先頭k要素をアラインメントする
/// 最小コストです。2本の単一行バッファを交互に再利用します。
fn forward_row<C>(a: &[C], b: &[C], costs: Costs) -> Vec<u32>
where
    C: Copy + Eq,
{
    let mut prev: Vec<u32> = (0..=b.len() as u32).map(|j| j * costs.gap).collect();
    let mut cur = vec![0u32; b.len() + 1];
    for (i, &ac) in a.iter().enumerate() {
        cur[0] = (i as u32 + 1) * costs.gap;
        for (j, &bc) in b.iter().enumerate() {
            let diag = prev[j] + if ac == bc { 0 } else { costs.substitution };
            cur[j + 1] = diag.min(prev[j + 1] + costs.gap).min(cur[j] + costs.gap);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev
}

/// 後ろ向きDPコスト行を計算します
///
/// 戻り値の第k要素は、`a` 全体と `b` の第k要素以降をアラインメントする
/// 最小コストです。前向き行とはバッファもループも独立しており、並行
/// 実行できます。
fn backward_row<C>(a: &[C], b: &[C], costs: Costs) -> Vec<u32>
where
    C: Copy + Eq,
{
    let n = b.len();
    let mut prev: Vec<u32> = (0..=n as u32).map(|j| (n as u32 - j) * costs.gap).collect();
    let mut cur = vec![0u32; n + 1];
    for (i, &ac) in a.iter().enumerate().rev() {
        let rows_below = (a.len() - i) as u32;
        cur[n] = rows_below * costs.gap;
        for (j, &bc) in b.iter().enumerate().rev() {
            let diag = prev[j + 1] + if ac == bc { 0 } else { costs.substitution };
            cur[j] = diag.min(prev[j] + costs.gap).min(cur[j + 1] + costs.gap);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev
}

/// 片側が単一要素に縮退した部分問題を再帰なしで解決します
///
/// 単一要素は、等しい要素の重複の中で最も後方の出現位置に配置されます
/// （右から左に走査して最後の一致を保持する規則）。一致が存在しない
/// 場合、置換が2ギャップより安ければ最後尾の位置で置換し、さもなくば
/// ギャップ対として配置します。
fn place_single<C, P, G>(
    single: C,
    others: &[C],
    costs: Costs,
    pair_at: P,
    gap_at: G,
    single_gap: (Option<usize>, Option<usize>),
    out: &mut Vec<(Option<usize>, Option<usize>)>,
) where
    C: Copy + Eq,
    P: Fn(usize) -> (Option<usize>, Option<usize>),
    G: Fn(usize) -> (Option<usize>, Option<usize>),
{
    let matched = others.iter().rposition(|&c| c == single);
    let paired = matched.or_else(|| {
        (costs.substitution <= 2 * costs.gap).then(|| others.len() - 1)
    });
    match paired {
        Some(pos) => {
            out.extend((0..pos).map(&gap_at));
            out.push(pair_at(pos));
            out.extend((pos + 1..others.len()).map(&gap_at));
        }
        None => {
            out.extend((0..others.len()).map(&gap_at));
            out.push(single_gap);
        }
    }
}
