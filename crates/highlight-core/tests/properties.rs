use proptest::prelude::*;

use highlight_core::hit::HitEnumExt;
use highlight_core::segment::{SegmenterConfig, SegmenterFactory};
use highlight_core::{
    Fragment, Hit, MergingHitEnum, ScoreOrderSnippetChooser, SnippetChooser, SourceExtracter, SourceOrderSnippetChooser,
    StrSourceExtracter, Utf16SourceExtracter, WeightCombiner,
};

/// Sorted, non-overlapping hits tagged with `source` in their term.
fn hit_source(source: usize) -> impl Strategy<Value = Vec<Hit>> {
    prop::collection::vec((0usize..4, 1usize..5), 0..12).prop_map(move |steps| {
        let mut at = 0;
        steps
            .into_iter()
            .map(|(gap, len)| {
                let start = at + gap;
                at = start + len;
                Hit::new(start, at, 1.0).with_term(source.to_string())
            })
            .collect()
    })
}

fn overlap_free(hits: &[Hit]) -> bool {
    hits.windows(2).all(|w| w[0].end_offset <= w[1].start_offset)
}

proptest! {
    #[test]
    fn merge_is_ordered_lossless_and_stable(sources in prop::collection::vec(hit_source(0), 1..5)) {
        let tagged: Vec<Vec<Hit>> = sources
            .into_iter()
            .enumerate()
            .map(|(i, hits)| hits.into_iter().map(|h| Hit { term: Some(i.to_string().into()), ..h }).collect())
            .collect();
        let merged: Vec<Hit> = MergingHitEnum::new(tagged.iter().cloned().map(|s| s.into_iter().boxed()).collect()).collect();

        prop_assert_eq!(merged.len(), tagged.iter().map(Vec::len).sum::<usize>());
        for w in merged.windows(2) {
            prop_assert!(w[0].offsets() <= w[1].offsets());
        }
        for (i, source) in tagged.iter().enumerate() {
            let tag = i.to_string();
            let restricted: Vec<Hit> = merged.iter().filter(|h| h.term.as_deref() == Some(tag.as_str())).cloned().collect();
            prop_assert_eq!(&restricted, source);
        }
    }

    #[test]
    fn overlap_resolution_is_idempotent(hits in hit_source(0)) {
        prop_assume!(overlap_free(&hits));
        let once: Vec<Hit> = hits.clone().into_iter().merge_overlaps(WeightCombiner::Max).collect();
        prop_assert_eq!(&once, &hits);
        let merged: Vec<Hit> = MergingHitEnum::new(vec![hits.clone().into_iter().boxed(), hits.into_iter().boxed()])
            .merge_overlaps(WeightCombiner::Sum)
            .collect();
        prop_assert!(overlap_free(&merged));
        let twice: Vec<Hit> = merged.clone().into_iter().merge_overlaps(WeightCombiner::Sum).collect();
        prop_assert_eq!(twice, merged);
    }

    #[test]
    fn str_extracter_never_splits_characters(text in "\\PC{0,24}", start in 0usize..120, end in 0usize..120) {
        let e = StrSourceExtracter::new(&text);
        let out = e.extract(start, end);
        if start >= end {
            prop_assert!(out.is_empty());
        }
        prop_assert!(text.contains(out.as_ref()));
    }

    #[test]
    fn utf16_extracter_never_returns_lone_surrogates(text in "[a-z😀é]{0,16}", start in 0usize..40, end in 0usize..40) {
        let e = Utf16SourceExtracter::new(&text);
        let out = e.extract(start, end);
        let replacement_char = '\u{FFFD}';
        prop_assert!(!out.contains(replacement_char));
        if start >= end {
            prop_assert!(out.is_empty());
        }
    }

    #[test]
    fn fragments_are_ordered_and_disjoint(
        text in "[a-z ,.!?]{0,200}",
        size in 1usize..40,
        max_scan in 0usize..12,
        policy in prop::sample::select(vec!["scan", "sentence", "none"]),
    ) {
        let factory = SegmenterConfig {
            fragmenter: Some(policy.to_string()),
            fragment_char_size: size,
            boundary_max_scan: max_scan,
            ..SegmenterConfig::default()
        }
        .build()
        .expect("factory");
        let fragments: Vec<Fragment> = factory.segmenter(&text).collect();
        for f in &fragments {
            prop_assert!(f.start < f.end && f.end <= text.len());
        }
        for w in fragments.windows(2) {
            prop_assert!(w[0].end <= w[1].start);
        }
    }

    #[test]
    fn choosers_respect_limits_and_order(hits in hit_source(0), max in 0usize..5) {
        let fragments: Vec<Fragment> = (0..20).map(|i| Fragment::new(i * 5, i * 5 + 5)).collect();
        let weighted: Vec<Hit> = hits.iter().enumerate().map(|(i, h)| Hit { weight: (i % 3) as f32, ..h.clone() }).collect();

        let by_score = ScoreOrderSnippetChooser::default().choose(&mut fragments.clone().into_iter(), &mut weighted.clone().into_iter(), max);
        prop_assert!(by_score.len() <= max);
        for w in by_score.windows(2) {
            prop_assert!(w[0].score > w[1].score || (w[0].score == w[1].score && w[0].fragment.start < w[1].fragment.start));
        }

        let by_source = SourceOrderSnippetChooser::default().choose(&mut fragments.into_iter(), &mut weighted.into_iter(), max);
        prop_assert!(by_source.len() <= max);
        for w in by_source.windows(2) {
            prop_assert!(w[0].fragment.start < w[1].fragment.start);
        }
        for s in by_score.iter().chain(&by_source) {
            prop_assert!(!s.hits.is_empty());
            prop_assert!(s.hits.iter().all(|h| s.fragment.contains_hit(h)));
        }
    }
}
