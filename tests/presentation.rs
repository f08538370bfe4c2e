use shellshow::core::model::{AlertKind, DiagnosticKind};
use shellshow::{
    Action, Block, BlockKind, Effect, NavigationState, Navigator, Presentation, StyleSpec, parse,
    to_markdown, update,
};

// ============================================================================
// Fixtures
// ============================================================================

/// Decks that between them touch every block kind and directive form.
const DECKS: &[&str] = &[
    "# Title\n\nBody line\n",
    "# One\n- a\n- b\n# Two\n1. x\n2. y\n---\n",
    "<!--\n---\ntitle: Talk\nauthor: Ferris\nslideBG: #101010\ntoc: yes\n---\n-->\n\
     # Intro\nstyle[bold italic]\nHello **world**\n\n## Part\n### Detail\n",
    "# Code\nmeta[bg:black|padding:1 2]\n```rust\nfn main() {\n\n    println!(\"hi\");\n}\n```\n\
     | A | B |\n|---|---|\n| 1 | 2 |\n",
    "# Art\n```IMAGE\n0110\n1991\n```\n> [!WARNING]\n> Careful\n> now\n\
     meta[color:#ff8800|align:center]\n~~done~~\n",
    "# Bullets\n* ---\n+ - -\n- plain\n",
    "preamble\n# Late\ntext\n```\nnever closed\n",
];

fn navigator(text: &str) -> Navigator {
    Navigator::new(parse(text)).expect("fixture has pages")
}

/// Every reachable state of a deck, page by page, reveal by reveal.
fn all_states(text: &str) -> Vec<NavigationState> {
    let presentation = parse(text);
    presentation
        .pages
        .iter()
        .enumerate()
        .flat_map(|(page_index, page)| {
            (1..=page.blocks.len()).map(move |reveal_count| NavigationState {
                page_index,
                reveal_count,
            })
        })
        .collect()
}

/// Drive a fresh navigator into `target` through the public commands.
fn navigate_to(text: &str, target: NavigationState) -> Navigator {
    let mut nav = navigator(text);
    update(&mut nav, Action::JumpToPage(target.page_index));
    while nav.state().reveal_count < target.reveal_count {
        assert_eq!(update(&mut nav, Action::RevealNext), Effect::Append);
    }
    assert_eq!(nav.state(), target);
    nav
}

fn kinds(presentation: &Presentation) -> Vec<Vec<BlockKind>> {
    presentation
        .pages
        .iter()
        .map(|page| page.blocks.iter().map(|b| b.kind.clone()).collect())
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn every_page_opens_with_its_heading() {
    for deck in DECKS {
        let presentation = parse(deck);
        assert!(!presentation.pages.is_empty(), "no pages in {deck:?}");
        for page in &presentation.pages {
            assert_eq!(page.blocks[0].kind, BlockKind::Heading1);
            assert_eq!(page.blocks[0].raw_text, page.title);
        }
    }
}

#[test]
fn reveal_and_hide_are_inverse_away_from_boundaries() {
    for deck in DECKS {
        for state in all_states(deck) {
            let mut nav = navigate_to(deck, state);
            if nav.is_fully_revealed() {
                assert_eq!(update(&mut nav, Action::RevealNext), Effect::None);
                assert_eq!(nav.state(), state);
            } else {
                update(&mut nav, Action::RevealNext);
                update(&mut nav, Action::HideLast);
                assert_eq!(nav.state(), state);
            }

            let mut nav = navigate_to(deck, state);
            if state.reveal_count == 1 {
                assert_eq!(update(&mut nav, Action::HideLast), Effect::None);
                assert_eq!(nav.state(), state);
            } else {
                update(&mut nav, Action::HideLast);
                update(&mut nav, Action::RevealNext);
                assert_eq!(nav.state(), state);
            }
        }
    }
}

#[test]
fn visible_blocks_grow_as_a_prefix() {
    for deck in DECKS {
        let mut nav = navigator(deck);
        loop {
            let mut previous: Vec<Block> = nav.visible_blocks().to_vec();
            assert_eq!(previous.len(), nav.state().reveal_count);
            while update(&mut nav, Action::RevealNext) == Effect::Append {
                let now = nav.visible_blocks();
                assert_eq!(now.len(), nav.state().reveal_count);
                assert_eq!(&now[..now.len() - 1], previous.as_slice());
                previous = now.to_vec();
            }
            assert_eq!(nav.hidden_count(), 0);
            if update(&mut nav, Action::NextPage) == Effect::None {
                break;
            }
        }
    }
}

#[test]
fn canonical_listing_reparses_to_the_same_blocks() {
    for deck in DECKS {
        let first = parse(deck);
        let listing = to_markdown(&first);
        let second = parse(&listing);
        assert_eq!(kinds(&first), kinds(&second), "listing:\n{listing}");
        assert_eq!(first.pages, second.pages, "listing:\n{listing}");
        assert_eq!(first.project_metadata, second.project_metadata);
        // Canonical output is a fixed point.
        assert_eq!(to_markdown(&second), listing);
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn title_and_body_line() {
    let presentation = parse("# Title\n\nBody line\n");
    assert_eq!(presentation.pages.len(), 1);
    let page = &presentation.pages[0];
    assert_eq!(page.title, "Title");
    assert_eq!(
        page.blocks,
        vec![
            Block::new(BlockKind::Heading1, "Title", 1),
            Block::new(BlockKind::Paragraph, "Body line", 3),
        ]
    );

    let mut nav = Navigator::new(presentation).unwrap();
    assert_eq!(nav.state(), NavigationState { page_index: 0, reveal_count: 1 });
    update(&mut nav, Action::RevealNext);
    assert_eq!(nav.visible_blocks().len(), 2);
}

#[test]
fn directives_never_leak_past_their_block() {
    let presentation = parse("# T\nstyle[bold]\nRed text\nmeta[color:red]\nOther text\nPlain\n");
    let blocks = &presentation.pages[0].blocks;
    assert_eq!(
        blocks[1].style,
        Some(StyleSpec {
            free_form_tokens: vec!["bold".into()],
            ..Default::default()
        })
    );
    assert_eq!(
        blocks[2].style,
        Some(StyleSpec {
            color: Some("red".into()),
            ..Default::default()
        })
    );
    assert_eq!(blocks[3].style, None);
}

#[test]
fn unclosed_fence_runs_to_the_end() {
    let presentation = parse("# T\nbefore\n```sh\necho one\n\n# not a page\necho two\n");
    assert_eq!(presentation.pages.len(), 1);
    let blocks = &presentation.pages[0].blocks;
    assert_eq!(blocks.len(), 3);
    assert_eq!(
        blocks[2].kind,
        BlockKind::CodeFence {
            language: Some("sh".into())
        }
    );
    assert_eq!(blocks[2].raw_text, "echo one\n\n# not a page\necho two");
    assert!(
        presentation
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::UnterminatedFence)
    );
}

#[test]
fn list_lines_reveal_one_at_a_time() {
    let mut nav = navigator("# T\n- one\n- two\n- three\n");
    assert_eq!(nav.current_page().blocks.len(), 4);
    for expected in ["one", "two", "three"] {
        assert_eq!(update(&mut nav, Action::RevealNext), Effect::Append);
        let last = nav.visible_blocks().last().unwrap();
        assert_eq!(last.raw_text, expected);
        assert!(matches!(last.kind, BlockKind::ListItem { ordered: false, .. }));
    }
    assert_eq!(update(&mut nav, Action::RevealNext), Effect::None);
}

// ============================================================================
// Adapters
// ============================================================================

#[test]
fn front_matter_reaches_project_metadata() {
    let presentation = parse(DECKS[2]);
    let meta = &presentation.project_metadata;
    assert_eq!(meta.title.as_deref(), Some("Talk"));
    assert_eq!(meta.author.as_deref(), Some("Ferris"));
    assert_eq!(meta.default_background.as_deref(), Some("#101010"));
    assert!(meta.show_table_of_contents);
    assert_eq!(presentation.pages[0].title, "Intro");
}

#[test]
fn alerts_and_images_are_single_blocks() {
    let presentation = parse(DECKS[4]);
    let blocks = &presentation.pages[0].blocks;
    assert_eq!(blocks[1].kind, BlockKind::PixelImage);
    assert_eq!(
        blocks[2].kind,
        BlockKind::Alert {
            kind: AlertKind::Warning
        }
    );
    assert_eq!(blocks[2].raw_text, "Careful\nnow");
    assert_eq!(
        blocks[3].style.as_ref().and_then(|s| s.color.as_deref()),
        Some("#ff8800")
    );
}

#[test]
fn load_swaps_the_deck_only_when_it_has_pages() {
    let mut nav = navigator(DECKS[1]);
    update(&mut nav, Action::NextPage);

    let effect = update(&mut nav, Action::Load("no headings at all".into()));
    assert!(matches!(effect, Effect::Rejected(_)));
    assert_eq!(nav.state().page_index, 1);

    assert_eq!(update(&mut nav, Action::Load(DECKS[0].into())), Effect::Redraw);
    assert_eq!(nav.page_count(), 1);
    assert_eq!(nav.state(), NavigationState::START);
}

#[test]
fn json_dump_names_block_kinds() {
    let presentation = parse("# T\n> [!TIP]\n> hi\n");
    let json = serde_json::to_value(&presentation).unwrap();
    let alert = &json["pages"][0]["blocks"][1];
    assert_eq!(alert["kind"]["type"], "alert");
    assert_eq!(alert["raw_text"], "hi");
}

#[test]
fn empty_document_is_refused() {
    let presentation = parse("just words\n\nmore words\n");
    assert!(presentation.is_empty());
    assert!(Navigator::new(presentation).is_err());
}
