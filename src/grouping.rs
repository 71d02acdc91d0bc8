//! Stable grouping of resource items by their directory component.

use indexmap::IndexMap;

use crate::models::ResourceItem;

/// Key of the implicit group holding root level resources.
pub const ROOT_GROUP: &str = "";

/// Directory portion of a logical path, or [`ROOT_GROUP`] when there is none.
pub fn directory_key(logical_path: &str) -> &str {
  logical_path
    .rsplit_once('/')
    .map_or(ROOT_GROUP, |(directory, _)| directory)
}

/// Items grouped by directory, keyed in first-seen order.
#[derive(Debug, Default)]
pub struct PathGroups<'a> {
  groups: IndexMap<&'a str, Vec<&'a ResourceItem>>,
}

impl<'a> PathGroups<'a> {
  /// Group the items without reordering them.
  pub fn from_items(items: &'a [ResourceItem]) -> Self {
    let mut groups: IndexMap<&'a str, Vec<&'a ResourceItem>> = IndexMap::new();
    for item in items {
      groups
        .entry(directory_key(item.logical_path()))
        .or_default()
        .push(item);
    }
    Self { groups }
  }

  /// Named groups in first-seen order, excluding the root group.
  pub fn named(&self) -> impl Iterator<Item = (&'a str, &[&'a ResourceItem])> + '_ {
    self
      .groups
      .iter()
      .filter(|(key, _)| !key.is_empty())
      .map(|(key, items)| (*key, items.as_slice()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn items(names: &[&str]) -> Vec<ResourceItem> {
    names
      .iter()
      .map(|name| ResourceItem::new(name, "App"))
      .collect()
  }

  #[test]
  fn computes_directory_keys() {
    assert_eq!(directory_key("icon.png"), "");
    assert_eq!(directory_key("sub/data.json"), "sub");
    assert_eq!(directory_key("a/b/c.txt"), "a/b");
  }

  #[test]
  fn root_level_items_have_no_named_group() {
    let items = items(&["App.icon.png", "App.readme.md"]);
    let groups = PathGroups::from_items(&items);

    assert_eq!(groups.named().count(), 0);
  }

  #[test]
  fn preserves_first_seen_key_and_item_order() {
    let items = items(&[
      "App.zeta.b.txt",
      "App.alpha.a.txt",
      "App.top.txt",
      "App.zeta.a.txt",
      "App.alpha.nested.c.txt",
    ]);
    let groups = PathGroups::from_items(&items);

    let named: Vec<(&str, Vec<&str>)> = groups
      .named()
      .map(|(key, members)| {
        (
          key,
          members.iter().map(|item| item.resource_name()).collect(),
        )
      })
      .collect();

    assert_eq!(named, vec![
      ("zeta", vec!["App.zeta.b.txt", "App.zeta.a.txt"]),
      ("alpha", vec!["App.alpha.a.txt"]),
      ("alpha/nested", vec!["App.alpha.nested.c.txt"]),
    ]);
  }

  #[test]
  fn empty_input_produces_no_groups() {
    let groups = PathGroups::from_items(&[]);
    assert_eq!(groups.named().count(), 0);
  }
}
