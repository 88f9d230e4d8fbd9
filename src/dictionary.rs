//! 外部辞書サービスの境界
//!
//! このコアは辞書の内部格納方式を所有しません。形態素セグメンタの
//! 最長一致探索とアクセント句の頻度分類は、[`Dictionary`] トレイトを
//! 通じた読み取り専用の外部呼び出しとして行われます。複数のセグメント
//! ワーカーから並行に呼び出されるため、実装は `Sync` である必要が
//! あります。

use hashbrown::{HashMap, HashSet};

/// 単語の頻度分類
///
/// 順序は「より一般的」が小さくなるように定義されます。複数の候補キー
/// からの分類は最小値（最も一般的な分類）を採用します。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Frequency {
    /// 最頻出語
    VeryCommon,
    /// 頻出語
    Common,
    /// やや稀な語
    Uncommon,
    /// 稀な語
    Rare,
    /// 極めて稀な語
    VeryRare,
}

/// 外部辞書サービスのインターフェース
///
/// # 実装要件
///
/// 両メソッドとも読み取り専用であり、複数スレッドから並行に呼び出され
/// ます。
pub trait Dictionary: Sync {
    /// 単語が辞書に存在するかを判定します
    ///
    /// 最長一致探索から表層形または正規化済み読み（ひらがな）で照会
    /// されます。
    fn contains_word(&self, word: &str) -> bool;

    /// 単語の頻度分類を返します
    ///
    /// 辞書に頻度情報がない場合は `None` を返します。
    fn frequency_of(&self, word: &str) -> Option<Frequency>;
}

/// ハッシュ集合に基づく単純な辞書実装
///
/// テストとデモ用途のリファレンス実装です。
#[derive(Default)]
pub struct HashSetDictionary {
    words: HashSet<String>,
    frequencies: HashMap<String, Frequency>,
}

impl HashSetDictionary {
    /// 単語のイテレータから辞書を生成します
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_string()).collect(),
            frequencies: HashMap::new(),
        }
    }

    /// 頻度分類を登録します
    pub fn set_frequency<S>(&mut self, word: S, freq: Frequency)
    where
        S: AsRef<str>,
    {
        self.frequencies.insert(word.as_ref().to_string(), freq);
    }
}

impl Dictionary for HashSetDictionary {
    #[inline(always)]
    fn contains_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[inline(always)]
    fn frequency_of(&self, word: &str) -> Option<Frequency> {
        self.frequencies.get(word).copied()
    }
}

/// 候補キー集合から頻度分類を選択します
///
/// 各候補キーを照会し、得られた分類の最小値（最も一般的なもの）を
/// 返します。どのキーも未登録であれば `None` を返します。
pub(crate) fn classify_frequency<D>(dict: &D, candidates: &[&str]) -> Option<Frequency>
where
    D: Dictionary + ?Sized,
{
    candidates
        .iter()
        .filter_map(|key| dict.frequency_of(key))
        .min()
}
