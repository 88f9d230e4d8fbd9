//! 内部ユーティリティ関数
//!
//! 語彙素の素性行（CSV形式）の解析を提供します。素性の値には引用符で
//! 囲まれたカンマ入りフィールドが現れることがあるため、単純な
//! `str::split` ではなく csv-core を使用します。

use csv_core::ReadFieldResult;

/// CSV形式の素性行を解析してフィールドのベクターに分割します
///
/// ダブルクォートで囲まれたフィールドや、フィールド内のカンマも正しく
/// 処理します。
///
/// # 引数
///
/// * `row` - 解析するCSV形式の文字列
///
/// # 戻り値
///
/// 解析されたフィールドを格納する文字列のベクター
///
/// # 例
///
/// ```
/// # use yomigana::utils::parse_feature_row;
/// let fields = parse_feature_row("助詞,係助詞,*,*");
/// assert_eq!(fields, vec!["助詞", "係助詞", "*", "*"]);
///
/// let quoted = parse_feature_row("名詞,\"1,2-ジクロロエタン\"");
/// assert_eq!(quoted, vec!["名詞", "1,2-ジクロロエタン"]);
/// ```
pub fn parse_feature_row(row: &str) -> Vec<String> {
    let mut fields = vec![];
    let mut rdr = csv_core::Reader::new();
    let mut bytes = row.as_bytes();
    let mut output = [0; 4096];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        let end = !matches!(result, ReadFieldResult::Field { .. });
        // The row is always complete in memory, so OutputFull cannot occur
        // for feature slots (bounded well below 4096 bytes).
        fields.push(std::str::from_utf8(&output[..nout]).unwrap().to_string());
        if end {
            break;
        }
        bytes = &bytes[nin..];
    }
    fields
}
