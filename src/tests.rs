use super::*;

const LIST_HTML: &str = r#"
<div id='app'>
  <ul id='list'>
    <li id='x' class='row'>first</li>
    <li id='y' class='row alt'>second</li>
  </ul>
  <p id='note' data-kind='hint-text'>note</p>
</div>
"#;

#[test]
fn direct_handler_is_reported_on_bound_element() -> Result<()> {
    let mut page = Page::from_html("<button id='a'>go</button><form id='f'></form>")?;
    page.listen("#a", "click")?;

    let a = page.node_id_of("#a")?;
    let results = page.scan("click", "#a")?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].element, a);
    assert_eq!(results[0].events.len(), 1);
    assert!(!results[0].events[0].descriptor.is_delegated());
    assert_eq!(results[0].events[0].covered, vec![a]);

    assert!(page.has_click_handler("#a")?);
    assert!(!page.has_submit_handler("#a")?);
    Ok(())
}

#[test]
fn delegated_handler_is_attributed_to_container() -> Result<()> {
    let mut page = Page::from_html(LIST_HTML)?;
    page.listen_delegated("#list", "click", "li")?;

    let list = page.node_id_of("#list")?;
    let x = page.node_id_of("#x")?;
    let y = page.node_id_of("#y")?;

    let results = page.scan("click", "li#x")?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].element, list);
    assert_eq!(results[0].events.len(), 1);
    assert_eq!(
        results[0].events[0].descriptor.selector.as_deref(),
        Some("li")
    );
    assert!(results[0].events[0].covered.contains(&x));
    assert!(!results[0].events[0].covered.contains(&y));

    // Nothing is reported against the list items themselves.
    assert!(results.iter().all(|entry| entry.element != x));
    Ok(())
}

#[test]
fn delegated_handler_does_not_cover_its_own_element() -> Result<()> {
    let mut page = Page::from_html(LIST_HTML)?;
    page.listen_delegated("#list", "click", "ul")?;

    // The delegation selector only sees descendants, so the list itself
    // is outside the handler's coverage.
    assert!(page.scan("click", "#list")?.is_empty());
    Ok(())
}

#[test]
fn delegation_outside_scope_is_excluded() -> Result<()> {
    let mut page = Page::from_html(LIST_HTML)?;
    page.listen_delegated("#list", "click", "li")?;

    // #note lies outside the delegated coverage entirely.
    assert!(page.scan("click", "#note")?.is_empty());
    assert!(!page.has_click_handler("#note")?);
    Ok(())
}

#[test]
fn delegated_coverage_is_scoped_to_descendants() -> Result<()> {
    let html = r#"
    <div id='inner'><span class='hit' id='in'></span></div>
    <span class='hit' id='out'></span>
    "#;
    let mut page = Page::from_html(html)?;
    page.listen_delegated("#inner", "click", ".hit")?;

    assert!(page.has_click_handler("#in")?);
    assert!(page.scan("click", "#out")?.is_empty());
    Ok(())
}

#[test]
fn unknown_event_type_yields_empty_result() -> Result<()> {
    let mut page = Page::from_html(LIST_HTML)?;
    page.listen("#list", "click")?;

    assert!(page.scan("frobnicate", "*")?.is_empty());
    assert!(!page.has_handler("frobnicate", "*")?);
    Ok(())
}

#[test]
fn zero_match_target_selector_is_empty_not_error() -> Result<()> {
    let mut page = Page::from_html(LIST_HTML)?;
    page.listen("#list", "click")?;

    assert!(page.scan("click", ".absent")?.is_empty());
    assert!(!page.has_click_handler(".absent")?);
    Ok(())
}

#[test]
fn invalid_selector_is_rejected() -> Result<()> {
    let page = Page::from_html(LIST_HTML)?;

    assert!(matches!(
        page.scan("click", "##"),
        Err(Error::UnsupportedSelector(_))
    ));
    assert!(matches!(
        page.has_click_handler("li >"),
        Err(Error::UnsupportedSelector(_))
    ));
    assert!(matches!(
        page.has_any_standard_handler(""),
        Err(Error::UnsupportedSelector(_))
    ));
    Ok(())
}

#[test]
fn invalid_delegation_selector_surfaces_from_scan() -> Result<()> {
    let mut page = Page::from_html(LIST_HTML)?;
    page.listen_with("#list", HandlerDescriptor::delegated("click", "[broken"))?;

    assert!(matches!(
        page.scan("click", "*"),
        Err(Error::UnsupportedSelector(_))
    ));
    Ok(())
}

#[test]
fn universal_selector_includes_document_handlers() -> Result<()> {
    let mut page = Page::from_html(LIST_HTML)?;
    page.listen_on_document("click");

    let results = page.scan("click", "*")?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].element, page.document_node());
    assert_eq!(results[0].events[0].covered, vec![page.document_node()]);

    // A non-universal scope never reaches the document node.
    assert!(page.scan("click", "div")?.is_empty());
    Ok(())
}

#[test]
fn scan_empty_iff_predicate_false() -> Result<()> {
    let mut page = Page::from_html(LIST_HTML)?;
    page.listen("#x", "mousedown")?;
    page.listen_delegated("#app", "change", "li")?;

    for (event_type, selector) in [
        ("mousedown", "#x"),
        ("mousedown", "#y"),
        ("change", "li"),
        ("change", "#note"),
        ("click", "*"),
    ] {
        let scanned = page.scan(event_type, selector)?;
        assert_eq!(
            scanned.is_empty(),
            !page.has_handler(event_type, selector)?,
            "mismatch for {event_type} / {selector}"
        );
    }
    Ok(())
}

#[test]
fn repeated_scans_return_equal_results() -> Result<()> {
    let mut page = Page::from_html(LIST_HTML)?;
    page.listen("#x", "click")?;
    page.listen_delegated("#list", "click", "li")?;

    let first = page.scan("click", "*")?;
    let second = page.scan("click", "*")?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn scan_reflects_listeners_added_between_calls() -> Result<()> {
    let mut page = Page::from_html(LIST_HTML)?;
    assert!(page.scan("click", "*")?.is_empty());

    page.listen("#x", "click")?;
    assert_eq!(page.scan("click", "*")?.len(), 1);
    Ok(())
}

#[test]
fn entries_follow_document_order_of_first_match() -> Result<()> {
    let mut page = Page::from_html(LIST_HTML)?;
    // Seed in reverse document order; results must not care.
    page.listen("#note", "click")?;
    page.listen("#x", "click")?;
    page.listen("#app", "click")?;

    let app = page.node_id_of("#app")?;
    let x = page.node_id_of("#x")?;
    let note = page.node_id_of("#note")?;

    let elements: Vec<NodeId> = page
        .scan("click", "*")?
        .into_iter()
        .map(|entry| entry.element)
        .collect();
    assert_eq!(elements, vec![app, x, note]);
    Ok(())
}

#[test]
fn multiple_handlers_on_one_element_share_one_entry() -> Result<()> {
    let mut page = Page::from_html(LIST_HTML)?;
    page.listen("#list", "click")?;
    page.listen_delegated("#list", "click", "li")?;

    let results = page.scan("click", "*")?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].events.len(), 2);
    assert!(!results[0].events[0].descriptor.is_delegated());
    assert!(results[0].events[1].descriptor.is_delegated());
    Ok(())
}

#[test]
fn descriptor_metadata_rides_through_untouched() -> Result<()> {
    let mut page = Page::from_html(LIST_HTML)?;
    let descriptor = HandlerDescriptor::direct("click")
        .with_capture()
        .with_namespace("plugin")
        .with_meta("handler", "fn#42")
        .with_meta("guid", "7");
    page.listen_with("#x", descriptor.clone())?;

    let results = page.scan("click", "#x")?;
    assert_eq!(results[0].events[0].descriptor, descriptor);
    Ok(())
}

#[test]
fn has_any_standard_handler_with_zero_one_and_many() -> Result<()> {
    let mut page = Page::from_html(LIST_HTML)?;
    assert!(!page.has_any_standard_handler("#x")?);

    page.listen("#x", "change")?;
    assert!(page.has_any_standard_handler("#x")?);

    page.listen("#x", "mouseleave")?;
    page.listen_delegated("#list", "submit", "li")?;
    assert!(page.has_any_standard_handler("#x")?);
    Ok(())
}

#[test]
fn non_standard_event_does_not_count_as_standard() -> Result<()> {
    let mut page = Page::from_html(LIST_HTML)?;
    page.listen("#x", "focus")?;

    assert!(!page.has_any_standard_handler("#x")?);
    assert!(page.has_handler("focus", "#x")?);
    Ok(())
}

#[test]
fn every_fixed_predicate_sees_its_own_event_type() -> Result<()> {
    let mut page = Page::from_html(LIST_HTML)?;
    for event_type in STANDARD_EVENT_TYPES {
        page.listen("#x", event_type)?;
    }

    let scanner = page.scanner();
    assert!(scanner.has_click_handler("#x")?);
    assert!(scanner.has_submit_handler("#x")?);
    assert!(scanner.has_change_handler("#x")?);
    assert!(scanner.has_dblclick_handler("#x")?);
    assert!(scanner.has_select_handler("#x")?);
    assert!(scanner.has_resize_handler("#x")?);
    assert!(scanner.has_mouseover_handler("#x")?);
    assert!(scanner.has_mouseout_handler("#x")?);
    assert!(scanner.has_mousedown_handler("#x")?);
    assert!(scanner.has_mouseup_handler("#x")?);
    assert!(scanner.has_mouseenter_handler("#x")?);
    assert!(scanner.has_mouseleave_handler("#x")?);
    Ok(())
}

#[test]
fn unavailable_registry_fails_on_first_use() -> Result<()> {
    let page = Page::from_html(LIST_HTML)?;
    let registry = UnavailableRegistry;
    let scanner = HandlerScanner::new(page.dom(), &registry);

    assert!(matches!(
        scanner.scan("click", "*"),
        Err(Error::RegistryUnavailable(_))
    ));
    assert!(matches!(
        scanner.has_click_handler("#x"),
        Err(Error::RegistryUnavailable(_))
    ));
    assert!(matches!(
        scanner.has_any_standard_handler("*"),
        Err(Error::RegistryUnavailable(_))
    ));
    Ok(())
}

#[test]
fn seeding_unmatched_selector_fails() -> Result<()> {
    let mut page = Page::from_html(LIST_HTML)?;
    assert!(matches!(
        page.listen("#ghost", "click"),
        Err(Error::SelectorNotFound(_))
    ));
    assert!(page.listeners().is_empty());
    Ok(())
}

#[test]
fn seeding_binds_every_matched_element() -> Result<()> {
    let mut page = Page::from_html(LIST_HTML)?;
    page.listen(".row", "click")?;

    let results = page.scan("click", "*")?;
    assert_eq!(results.len(), 2);
    Ok(())
}

#[test]
fn selector_combinators_match_as_expected() -> Result<()> {
    let html = r#"
    <div id='top'>
      <p id='one'></p>
      <span id='two'></span>
      <span id='three'></span>
    </div>
    <span id='four'></span>
    "#;
    let page = Page::from_html(html)?;

    let two = page.node_id_of("#two")?;
    let three = page.node_id_of("#three")?;
    let four = page.node_id_of("#four")?;

    assert_eq!(page.query_selector_all("div > span")?, vec![two, three]);
    assert_eq!(page.query_selector_all("p + span")?, vec![two]);
    assert_eq!(page.query_selector_all("p ~ span")?, vec![two, three]);
    assert_eq!(page.query_selector_all("div span")?, vec![two, three]);
    assert_eq!(
        page.query_selector_all("#one, #four, #three")?,
        vec![page.node_id_of("#one")?, three, four]
    );
    Ok(())
}

#[test]
fn selector_attribute_operators_match_as_expected() -> Result<()> {
    let page = Page::from_html(LIST_HTML)?;
    let note = page.node_id_of("#note")?;

    assert_eq!(page.query_selector_all("[data-kind]")?, vec![note]);
    assert_eq!(
        page.query_selector_all("[data-kind='hint-text']")?,
        vec![note]
    );
    assert_eq!(page.query_selector_all("[data-kind^=hint]")?, vec![note]);
    assert_eq!(page.query_selector_all("[data-kind$=text]")?, vec![note]);
    assert_eq!(page.query_selector_all("[data-kind*=nt-te]")?, vec![note]);
    assert_eq!(page.query_selector_all("[data-kind|=hint]")?, vec![note]);
    assert!(page.query_selector_all("[data-kind~=hint]")?.is_empty());
    assert_eq!(page.query_selector_all("[class~=alt]")?.len(), 1);
    Ok(())
}

#[test]
fn universal_selector_excludes_document_in_plain_queries() -> Result<()> {
    let page = Page::from_html("<div id='only'></div>")?;
    let all = page.query_selector_all("*")?;
    assert_eq!(all, vec![page.node_id_of("#only")?]);
    assert!(!all.contains(&page.document_node()));
    Ok(())
}

#[test]
fn html_parser_handles_void_tags_comments_and_nesting() -> Result<()> {
    let html = r#"
    <!-- header -->
    <div id='wrap' class='outer main'>
      <img src='x.png'>
      <input id='field' type='text'>
      <br/>
      <span id='deep'>text</span>
    </div>
    "#;
    let page = Page::from_html(html)?;

    assert_eq!(page.dom().tag_name(page.node_id_of("#wrap")?), Some("div"));
    assert_eq!(page.dom().attr(page.node_id_of("#field")?, "type"), Some("text"));
    assert_eq!(
        page.dom().parent(page.node_id_of("#deep")?),
        Some(page.node_id_of("#wrap")?)
    );
    // Void elements must not swallow their siblings.
    assert_eq!(page.query_selector_all("#wrap > *")?.len(), 4);
    Ok(())
}

#[test]
fn html_parser_treats_script_bodies_as_raw_text() -> Result<()> {
    let html = "<div id='a'></div><script>if (1 < 2) { x(); }</script><div id='b'></div>";
    let page = Page::from_html(html)?;

    assert_eq!(page.query_selector_all("div")?.len(), 2);
    Ok(())
}

#[test]
fn html_parser_rejects_unclosed_constructs() -> Result<()> {
    assert!(matches!(
        Page::from_html("<!-- never closed"),
        Err(Error::HtmlParse(_))
    ));
    assert!(matches!(
        Page::from_html("<div id='x'"),
        Err(Error::HtmlParse(_))
    ));
    Ok(())
}

#[test]
fn boolean_attributes_parse_and_match() -> Result<()> {
    let page = Page::from_html("<input id='i' disabled>")?;
    assert_eq!(page.query_selector_all("[disabled]")?.len(), 1);
    Ok(())
}
