use std::collections::BTreeSet;

use crate::model::StyleAnnotation;

/// A sub-range of a paragraph together with the annotations covering it.
#[derive(Clone, Debug)]
pub struct Segment<'a> {
    pub start: usize,
    pub end: usize,
    pub active: Vec<&'a StyleAnnotation>,
}

/// Clamps an annotation's offsets into `[0, len]`. The result may still be
/// inverted or empty; callers decide what that means.
pub fn clamp_range(ann: &StyleAnnotation, len: usize) -> (usize, usize) {
    let clamp = |v: i64| v.clamp(0, len as i64) as usize;
    (clamp(ann.start_offset), clamp(ann.end_offset))
}

/// True when the clamped range covers at least one char.
pub fn is_effective(ann: &StyleAnnotation, len: usize) -> bool {
    let (start, end) = clamp_range(ann, len);
    start < end
}

/// Ascending, duplicate-free edge offsets for a paragraph of `len` chars:
/// `0`, `len` and every clamped annotation edge. No annotation edge falls
/// strictly inside a range between two consecutive offsets.
pub fn boundaries(len: usize, annotations: &[&StyleAnnotation]) -> Vec<usize> {
    let mut edges = BTreeSet::from([0, len]);
    for ann in annotations {
        let (start, end) = clamp_range(ann, len);
        edges.insert(start);
        edges.insert(end);
    }
    edges.into_iter().collect()
}

/// Annotations whose clamped range contains `[start, end)`, in list order.
///
/// Only meaningful for ranges produced by [`boundaries`]: there an
/// annotation either contains the range or is disjoint from it, so a
/// containment check is enough.
pub fn active_annotations<'a>(
    start: usize,
    end: usize,
    len: usize,
    annotations: &[&'a StyleAnnotation],
) -> Vec<&'a StyleAnnotation> {
    annotations
        .iter()
        .copied()
        .filter(|ann| {
            let (a_start, a_end) = clamp_range(ann, len);
            a_start <= start && a_end >= end
        })
        .collect()
}

/// Partitions `[0, len)` into non-empty segments with their active sets.
pub fn segments<'a>(len: usize, annotations: &[&'a StyleAnnotation]) -> Vec<Segment<'a>> {
    boundaries(len, annotations)
        .windows(2)
        .map(|w| Segment {
            start: w[0],
            end: w[1],
            active: active_annotations(w[0], w[1], len, annotations),
        })
        .collect()
}
