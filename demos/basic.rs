use mailsift::{ArchiveOptions, FilterSetBuilder};

fn main() {
    let mut builder = FilterSetBuilder::new().me(["me@example.com"]);

    builder
        .filter(|f| f.from(["notifications@github.example"]).label("github").mark_read())
        .otherwise(|f| f.label("inbox"));

    builder
        .filter(|f| f.has(["list:rust-users@example.org"]).label("lists/rust"))
        .archive_unless_directed(ArchiveOptions::default());

    let filters = builder.compile().expect("failed to compile filter set");
    println!("{}", filters.to_xml());
}
