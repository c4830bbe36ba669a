//! A fuller filter set in the shape a personal account accumulates:
//! mailing-list loops, a notification triage chain, and forwarding.

use mailsift::{any, ArchiveOptions, Criteria, FilterSetBuilder};

const MY_EMAILS: [&str; 2] = ["test@example.com", "test.tester@example.com"];
const FB_EMAIL: &str = "from:notification@facebookmail.example";

fn main() {
    let mut builder = FilterSetBuilder::new().me(MY_EMAILS);

    // Put mailman housekeeping away unread.
    builder.filter(|f| {
        f.has(["subject:\"moderator request\""])
            .label("bulk/mailman")
            .archive()
            .mark_read()
    });

    // Archive all mailman mail except confirmation requests.
    builder
        .filter(|f| f.has(["from:mailman", "subject:confirm"]).label("bulk"))
        .otherwise(|f| f.has(["from:mailman"]).label("bulk").archive());

    // Mailing lists: label, and archive whatever isn't directed at me.
    let lists = [
        ("list:mcclim@common-lisp.example", "lisp/mcclim"),
        ("list:sbcl-devel@lists.example.org", "lisp/sbcl"),
        ("list:emacs-orgmode@gnu.example", "orgmode"),
        ("list:openscad@rocklinux.example", "thingiverse"),
    ];
    for (list, label) in lists {
        builder
            .filter(move |f| f.has([list]).never_spam().label(label))
            .archive_unless_directed(ArchiveOptions::default());
    }

    // Notification triage: interesting ones stay, the rest get archived,
    // and mail addressed to me directly is labeled last.
    builder
        .filter(|f| {
            f.has(vec![
                Criteria::from(FB_EMAIL),
                any([
                    "subject:\"added you as a friend\"",
                    "subject:\"sent you a message\"",
                ]),
            ])
            .label("bulk/fb")
        })
        .otherwise(|f| f.has([FB_EMAIL]).label("bulk/fb").archive().mark_read())
        .otherwise(|f| {
            let to_me = any(f.me().iter().map(|address| format!("to:{address}")));
            f.has([to_me]).label("personal")
        });

    // Package tracking goes to the tracker.
    builder.filter(|f| {
        f.has(["from:ship-confirm@amazon.example"])
            .label("bulk/packages")
            .forward_to("package-tracker@example.com")
    });

    let filters = builder.compile().expect("failed to compile filter set");
    println!("{}", filters.to_xml());
}
