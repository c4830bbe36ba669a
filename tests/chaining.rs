use mailsift::{any, ArchiveOptions, FilterSetBuilder};

#[test]
fn otherwise_negates_single_from_address() {
    let mut builder = FilterSetBuilder::new();
    builder
        .filter(|f| f.from(["asf@boinkor.example"]).label("ohai"))
        .otherwise(|f| f.label("bai"));

    let doc = builder.compile().unwrap().document();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.entries()[0].get("from"), Some("asf@boinkor.example"));
    assert_eq!(doc.entries()[0].get("label"), Some("ohai"));
    assert_eq!(doc.entries()[1].get("from"), Some("-asf@boinkor.example"));
    assert_eq!(doc.entries()[1].get("label"), Some("bai"));
}

#[test]
fn otherwise_negates_multiple_from_addresses() {
    let mut builder = FilterSetBuilder::new();
    builder
        .filter(|f| f.from(["asf@boinkor.example", "abc@boinkor.example"]).label("ohai"))
        .otherwise(|f| f.label("bai"));

    let doc = builder.compile().unwrap().document();
    assert_eq!(
        doc.entries()[0].get("from"),
        Some("asf@boinkor.example abc@boinkor.example")
    );
    assert_eq!(
        doc.entries()[1].get("from"),
        Some("-asf@boinkor.example -abc@boinkor.example")
    );
}

#[test]
fn otherwise_folds_remaining_words_into_has_not() {
    // Archive all mailman mail except confirmation requests.
    let mut builder = FilterSetBuilder::new();
    builder
        .filter(|f| f.has(["from:mailman", "subject:confirm"]).label("bulk"))
        .otherwise(|f| f.has(["from:mailman"]).label("bulk").archive());

    let doc = builder.compile().unwrap().document();
    assert_eq!(doc.entries()[1].get("hasTheWord"), Some("from:mailman"));
    assert_eq!(doc.entries()[1].get("doesNotHaveTheWord"), Some("subject:confirm"));
    assert_eq!(doc.entries()[1].get("shouldArchive"), Some("true"));
}

#[test]
fn otherwise_extends_parents_leading_or_group() {
    let mut builder = FilterSetBuilder::new();
    builder
        .filter(|f| {
            f.has_not([any(["subject:a", "subject:b"])])
                .has(["list:x"])
                .label("narrow")
        })
        .otherwise(|f| f.label("rest"));

    let doc = builder.compile().unwrap().document();
    assert_eq!(
        doc.entries()[1].get("doesNotHaveTheWord"),
        Some("(subject:a OR subject:b OR list:x)")
    );
}

#[test]
fn otherwise_negates_subject_terms() {
    let mut builder = FilterSetBuilder::new();
    builder
        .filter(|f| f.subject(["urgent"]).label("urgent"))
        .otherwise(|f| f.label("calm"));

    let doc = builder.compile().unwrap().document();
    assert_eq!(doc.entries()[1].get("subject"), Some("-urgent"));
}

#[test]
fn also_extends_criteria_with_new_fields() {
    let mut builder = FilterSetBuilder::new();
    builder
        .filter(|f| f.from(["from@boinkor.example"]).label("ohai"))
        .also(|f| f.to(["to@boinkor.example"]));

    let doc = builder.compile().unwrap().document();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.entries()[1].get("from"), Some("from@boinkor.example"));
    assert_eq!(doc.entries()[1].get("to"), Some("to@boinkor.example"));
}

#[test]
fn also_keeps_parent_criteria_with_both_labels() {
    let mut builder = FilterSetBuilder::new();
    builder
        .filter(|f| f.from(["a@b.example"]).label("L1"))
        .also(|f| f.label("L2"));

    let doc = builder.compile().unwrap().document();
    assert_eq!(doc.entries()[0].get("from"), Some("a@b.example"));
    assert_eq!(doc.entries()[0].get("label"), Some("L1"));
    assert_eq!(doc.entries()[1].get("from"), Some("a@b.example"));
    assert_eq!(doc.entries()[1].get("label"), Some("L2"));
}

#[test]
fn also_concatenates_shared_fields_child_first() {
    let mut builder = FilterSetBuilder::new();
    builder
        .filter(|f| f.has(["list:parent"]))
        .also(|f| f.has(["subject:child"]));

    let doc = builder.compile().unwrap().document();
    assert_eq!(
        doc.entries()[1].get("hasTheWord"),
        Some("subject:child list:parent")
    );
}

#[test]
fn archive_unless_directed_appends_and_returns_original() {
    let mut builder = FilterSetBuilder::new().me(["me@x.example"]);
    builder
        .filter(|f| f.has(["list:lisp"]).label("lisp"))
        .archive_unless_directed(ArchiveOptions::default())
        .otherwise(|f| f.has(["list:other"]).label("other"));

    let doc = builder.compile().unwrap().document();
    assert_eq!(doc.len(), 3);

    // The derived archive filter inherits the parent's criteria.
    assert_eq!(doc.entries()[1].get("hasTheWord"), Some("list:lisp"));
    assert_eq!(
        doc.entries()[1].get("doesNotHaveTheWord"),
        Some("(to:me@x.example)")
    );
    assert_eq!(doc.entries()[1].get("shouldArchive"), Some("true"));
    assert_eq!(doc.entries()[1].get("shouldMarkAsRead"), None);

    // The otherwise branch chains off the original filter, not the
    // archive filter.
    assert_eq!(doc.entries()[2].get("hasTheWord"), Some("list:other"));
    assert_eq!(doc.entries()[2].get("doesNotHaveTheWord"), Some("list:lisp"));
    assert_eq!(doc.entries()[2].get("label"), Some("other"));
}

#[test]
fn archive_unless_directed_takes_explicit_addresses_and_mark_read() {
    let mut builder = FilterSetBuilder::new();
    builder
        .filter(|f| f.has(["list:cats"]).label("cats"))
        .archive_unless_directed(ArchiveOptions {
            to: vec!["me@x.example".into(), "me@y.example".into()],
            mark_read: true,
        });

    let doc = builder.compile().unwrap().document();
    assert_eq!(doc.len(), 2);
    assert_eq!(
        doc.entries()[1].get("doesNotHaveTheWord"),
        Some("(to:me@x.example OR to:me@y.example)")
    );
    assert_eq!(doc.entries()[1].get("shouldArchive"), Some("true"));
    assert_eq!(doc.entries()[1].get("shouldMarkAsRead"), Some("true"));
}

#[test]
fn three_deep_otherwise_chain_retoggles_markers() {
    let mut builder = FilterSetBuilder::new();
    builder
        .filter(|f| f.from(["a@x"]).label("a"))
        .otherwise(|f| f.from(["b@x"]).label("b"))
        .otherwise(|f| f.label("c"));

    let doc = builder.compile().unwrap().document();
    assert_eq!(doc.entries()[0].get("from"), Some("a@x"));
    assert_eq!(doc.entries()[1].get("from"), Some("b@x -a@x"));
    assert_eq!(doc.entries()[2].get("from"), Some("-b@x a@x"));
}

#[test]
fn document_generation_is_idempotent() {
    let mut builder = FilterSetBuilder::new().me(["me@x.example"]);
    builder
        .filter(|f| f.has(["list:lisp"]).label("lisp"))
        .archive_unless_directed(ArchiveOptions::default())
        .otherwise(|f| f.label("rest"));

    let filters = builder.compile().unwrap();
    let first = filters.document();
    let second = filters.document();
    assert_eq!(first, second);
}

#[test]
fn derived_filters_appear_inline_in_definition_order() {
    let mut builder = FilterSetBuilder::new();
    builder
        .filter(|f| f.has(["one"]).label("one"))
        .otherwise(|f| f.label("one-else"));
    builder.filter(|f| f.has(["two"]).label("two"));

    let doc = builder.compile().unwrap().document();
    let labels: Vec<Option<&str>> = doc.entries().iter().map(|e| e.get("label")).collect();
    assert_eq!(labels, vec![Some("one"), Some("one-else"), Some("two")]);
}
