#![no_main]

use std::sync::OnceLock;

use libfuzzer_sys::fuzz_target;
use strftime_infer::{DateParser, LocaleSet};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
enum Query {
    /// Exercise the search engine against the bundled corpus.
    Parse { input: String },
    /// Exercise corpus loading against arbitrary (likely malformed) JSON.
    LoadCorpus { json: String },
}

fn bundled_parser() -> &'static DateParser {
    static PARSER: OnceLock<DateParser> = OnceLock::new();
    PARSER.get_or_init(|| DateParser::new(Some(LocaleSet::default_bundled())))
}

fuzz_target!(|query: Query| {
    match query {
        Query::Parse { ref input } => {
            bundled_parser().parse(input);
        }
        Query::LoadCorpus { ref json } => {
            let _ = LocaleSet::from_json_str(json);
        }
    }
});
