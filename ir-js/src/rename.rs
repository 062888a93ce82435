use crate::ir::Tree;
use crate::scan::Scanner;
use ahash::HashSet;
use ahash::HashSetExt;
use itertools::Itertools;
use once_cell::sync::Lazy;
use std::cmp::Reverse;
use tracing::debug;

const FIRST_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_$";
const REST_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_$0123456789";

/// Words a generated name must never be.
static RESERVED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  [
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "Infinity", "instanceof", "interface",
    "let", "NaN", "new", "null", "package", "private", "protected", "public", "return", "static",
    "super", "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void",
    "while", "with", "yield",
  ]
  .into_iter()
  .collect()
});

/// The `index`-th short identifier: `a`..`z`, `A`..`Z`, `_`, `$`, then `aa`,
/// `ba` and so on, least significant character first.
pub fn name_from_index(index: usize) -> String {
  let mut name = String::new();
  let mut rest = index / FIRST_CHARS.len();
  name.push(FIRST_CHARS[index % FIRST_CHARS.len()] as char);
  while rest > 0 {
    rest -= 1;
    name.push(REST_CHARS[rest % REST_CHARS.len()] as char);
    rest /= REST_CHARS.len();
  }
  name
}

/// Gives every scanned, unpinned symbol a short name. Symbols used more often
/// get shorter names; ties go to the symbol created first. Generated names
/// skip reserved words and the names of pinned symbols.
///
/// Returns how many symbols were renamed.
pub fn rename_symbols(tree: &mut Tree, scanner: &Scanner) -> usize {
  let mut taken = HashSet::new();
  for symbol in tree.symbol_ids() {
    if tree.symbol(symbol).pinned {
      taken.insert(tree.symbol_name(symbol).to_string());
    }
  }

  let order = scanner
    .usages()
    .filter(|(symbol, _)| !tree.symbol(*symbol).pinned)
    .sorted_by_key(|(symbol, usage)| (Reverse(usage.count()), *symbol))
    .map(|(symbol, _)| symbol)
    .collect_vec();

  let mut next = 0;
  for &symbol in &order {
    let name = loop {
      let candidate = name_from_index(next);
      next += 1;
      if !RESERVED.contains(candidate.as_str()) && !taken.contains(&candidate) {
        break candidate;
      }
    };
    tree.rename_symbol(symbol, name);
  }
  debug!(renamed = order.len(), "renamed symbols");
  order.len()
}
