//! アルファベット圧縮の前処理
//!
//! アラインメント本体の比較回数は膨大になるため、両系列に現れる相異なる
//! 要素の集合を、それを列挙できる最小の固定幅符号なし整数型
//! （8/16/32/64ビット）に写像してから動的計画法を実行します。これは純粋な
//! 性能最適化であり、アラインメント結果を変えてはいけません。写像は
//! すべての相異なる入力要素について正確に往復することが検証されます。

use std::hash::Hash;

use hashbrown::HashMap;

/// 圧縮済みの系列対
///
/// 相異なる要素数に応じて選択された整数幅ごとのバリアントを持ちます。
pub(crate) enum CompressedPair {
    /// 相異なる要素が256種以下
    W8(Vec<u8>, Vec<u8>),
    /// 相異なる要素が65536種以下
    W16(Vec<u16>, Vec<u16>),
    /// 相異なる要素が2^32種以下
    W32(Vec<u32>, Vec<u32>),
    /// それ以上
    W64(Vec<u64>, Vec<u64>),
}

/// 2系列の要素を共通のコード空間に内部化します
///
/// 両系列の相異なる要素の和集合を出現順に番号付けし、その濃度で表現
/// 可能な最小の整数幅のバリアントを返します。
///
/// # パニック
///
/// 内部化テーブルの往復検証に失敗した場合にパニックします。これは
/// `Eq`/`Hash` 実装の不整合を示すプログラミングエラーです。
pub(crate) fn compress<'a, T>(seq1: &'a [T], seq2: &'a [T]) -> CompressedPair
where
    T: Eq + Hash,
{
    let mut table: HashMap<&'a T, u64> = HashMap::new();
    let mut alphabet: Vec<&'a T> = vec![];
    let codes1 = intern(seq1, &mut table, &mut alphabet);
    let codes2 = intern(seq2, &mut table, &mut alphabet);
    let cardinality = alphabet.len() as u64;

    if cardinality <= u64::from(u8::MAX) + 1 {
        CompressedPair::W8(narrow(&codes1), narrow(&codes2))
    } else if cardinality <= u64::from(u16::MAX) + 1 {
        CompressedPair::W16(narrow(&codes1), narrow(&codes2))
    } else if cardinality <= u64::from(u32::MAX) + 1 {
        CompressedPair::W32(narrow(&codes1), narrow(&codes2))
    } else {
        CompressedPair::W64(codes1, codes2)
    }
}

fn intern<'a, T>(
    seq: &'a [T],
    table: &mut HashMap<&'a T, u64>,
    alphabet: &mut Vec<&'a T>,
) -> Vec<u64>
where
    T: Eq + Hash,
{
    seq.iter()
        .map(|v| {
            let code = *table.entry(v).or_insert_with(|| {
                alphabet.push(v);
                alphabet.len() as u64 - 1
            });
            // 往復検証: コードからテーブルを引き直して元の要素に戻ること
            assert!(
                alphabet[code as usize] == v,
                "alphabet compression failed to round-trip"
            );
            code
        })
        .collect()
}

fn narrow<C>(codes: &[u64]) -> Vec<C>
where
    C: TryFrom<u64>,
    <C as TryFrom<u64>>::Error: std::fmt::Debug,
{
    // 濃度の検査後に呼ばれるため、変換は常に成功する。
    codes.iter().map(|&c| C::try_from(c).unwrap()).collect()
}
