use super::*;

#[test] fn classify() {
  assert_eq!(Growth::between(None, 0), Growth::Initial);
  assert_eq!(Growth::between(None, 12), Growth::Initial);
  assert_eq!(Growth::between(Some(3), 4), Growth::Grew { from: 3, to: 4 });
  assert_eq!(Growth::between(Some(4), 4), Growth::Unchanged);
  assert_eq!(Growth::between(Some(4), 1), Growth::Shrank { from: 4, to: 1 });
}

#[test] fn only_growth_marks_new() {
  assert_eq!(Growth::between(Some(3), 4).new_index(), Some(3));
  // several at once: still only the highest index
  assert_eq!(Growth::between(Some(3), 9).new_index(), Some(8));
  assert_eq!(Growth::between(Some(0), 1).new_index(), Some(0));
  assert_eq!(Growth::between(None, 9).new_index(), None);
  assert_eq!(Growth::between(Some(9), 9).new_index(), None);
  assert_eq!(Growth::between(Some(9), 2).new_index(), None);
}

#[test] fn entrance_cue() {
  let cue = Growth::between(Some(1), 2).entrance(Duration::from_millis(500));
  assert_eq!(cue, Some(EntranceCue { index: 1, duration_ms: 500 }));
  assert_eq!(cue.map(|c| c.duration()), Some(Duration::from_millis(500)));
  assert_eq!(Growth::Unchanged.entrance(Duration::from_millis(500)), None);
}
