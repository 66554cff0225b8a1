//! Comment annotations attached to a value node.

/// Where a comment sits relative to the value it annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentPlacement {
  /// On the line before the value.
  Before = 0,
  /// Just after the value, on the same line.
  AfterOnSameLine,
  /// On the line after the value. Only meaningful for the root.
  After,
}

impl CommentPlacement {
  pub const ALL: [CommentPlacement; 3] = [
    CommentPlacement::Before,
    CommentPlacement::AfterOnSameLine,
    CommentPlacement::After,
  ];
}

/// Up to three comment slots. Nothing is allocated until a slot is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentSet {
  slots: Option<Box<[String; 3]>>,
}

impl CommentSet {
  pub const fn new() -> Self {
    CommentSet { slots: None }
  }

  /// Returns `true` if the slot holds a non-empty comment.
  pub fn has(&self, placement: CommentPlacement) -> bool {
    self.slots.as_ref().is_some_and(|slots| !slots[placement as usize].is_empty())
  }

  /// The comment in the slot, or `""`.
  pub fn get(&self, placement: CommentPlacement) -> &str {
    match &self.slots {
      Some(slots) => &slots[placement as usize],
      None => "",
    }
  }

  pub fn set(&mut self, placement: CommentPlacement, comment: impl Into<String>) {
    let slots = self.slots.get_or_insert_with(Default::default);
    slots[placement as usize] = comment.into();
  }

  pub fn is_allocated(&self) -> bool {
    self.slots.is_some()
  }
}
