use pitchgen_core::components::{ComponentType, schema_for_tag};
use pitchgen_core::data::{RecordKind, normalize};
use pitchgen_core::prompts::{
    ClientContext, GenerationResult, NoResults, PlaceholderExpander, PromptEditor, TemplateState,
    generate, system_prompt_for,
};
use serde_json::json;

fn services_catalog(count: usize) -> String {
    let records: Vec<_> = (1..=count)
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Service {id}"),
                "slug": format!("svc-{id}"),
            })
        })
        .collect();
    json!({ "data": records }).to_string()
}

#[test]
fn component_switch_discards_edits_for_every_type() {
    for component in ComponentType::ALL {
        let mut editor = PromptEditor::new(ComponentType::Services, ClientContext::default(), "[]");
        editor.edit_system("mine");
        editor.edit_user("also mine");

        let switched = editor.select_component(component, component.empty_raw_data());
        let fresh = generate(component, editor.context(), Some(editor.raw_data()));
        if component == ComponentType::Services {
            assert!(!switched);
            assert_eq!(editor.user_text(), "also mine");
            continue;
        }
        assert!(switched);
        assert_eq!(editor.system_state(), TemplateState::Auto);
        assert_eq!(editor.user_state(), TemplateState::Auto);
        assert_eq!(editor.system_text(), fresh.system);
        assert_eq!(editor.user_text(), fresh.user);
    }
}

#[test]
fn edited_template_survives_input_changes_byte_for_byte() {
    let mut editor = PromptEditor::new(
        ComponentType::CaseStudies,
        ClientContext::from("Initial brief"),
        "[]",
    );
    let edited = "Custom instructions for {{context}}\n\twith tabs and trailing space ";
    editor.edit_user(edited);
    let system_before = editor.system_text().to_string();

    let regenerated = editor.update_inputs(
        ClientContext::from("Completely different brief"),
        r#"[{"id": 4, "title": "Museum relaunch"}]"#,
    );
    assert!(!regenerated.user);
    assert_eq!(editor.user_text(), edited);
    assert_eq!(editor.user_state(), TemplateState::Edited);
    assert_eq!(editor.system_text(), system_before);

    editor.reset_user();
    assert_eq!(editor.user_state(), TemplateState::Auto);
    assert!(editor.user_text().contains("{{CASE_STUDIES}}"));
}

#[test]
fn system_prompts_never_depend_on_context() {
    let briefs = ["", "Ministry of Culture", "{{SERVICES}} injected"];
    for component in ComponentType::ALL {
        let texts: Vec<_> = briefs
            .iter()
            .map(|brief| system_prompt_for(component, &ClientContext::from(*brief)))
            .collect();
        assert!(texts.windows(2).all(|pair| pair[0] == pair[1]));
    }
}

#[test]
fn expansion_inlines_capped_services_and_leaves_foreign_tokens() {
    let raw = services_catalog(120);
    let context = ClientContext::from("Airline loyalty relaunch");
    let lookup = NoResults;
    let expander = PlaceholderExpander::new(ComponentType::Services, &context, &raw, &lookup);

    let expanded = expander.expand("{{context}} | {{SERVICES}} | {{context}} | {{AWARDS}}");
    assert_eq!(expanded.matches("Airline loyalty relaunch").count(), 2);
    assert!(expanded.contains("\"title\": \"Service 100\""));
    assert!(!expanded.contains("Service 101"));
    assert!(expanded.ends_with("| {{AWARDS}}"));
    assert_eq!(normalize(&raw, RecordKind::Services).len(), 100);
}

#[test]
fn expansion_reads_the_lookup_every_time() {
    let context = ClientContext::default();
    let empty = |_: ComponentType| -> Option<GenerationResult> { None };
    let hero = |component: ComponentType| {
        (component == ComponentType::HeroBanner).then(|| {
            GenerationResult::new(
                ComponentType::HeroBanner,
                r#"{"introCardId": "3"}"#,
                r#"[{"id": 3, "name": "Lena Park", "position": "Creative Officer"}]"#,
            )
        })
    };

    let template = "Captain: {{SELECTED_INTRO_MEMBER}}";
    let without = PlaceholderExpander::new(ComponentType::TeamMembers, &context, "[]", &empty);
    assert_eq!(without.expand(template), "Captain: None selected");

    let with = PlaceholderExpander::new(ComponentType::TeamMembers, &context, "[]", &hero);
    assert_eq!(
        with.expand(template),
        "Captain: ID: 3, Name: Lena Park, Position: Creative Officer"
    );
}

#[test]
fn unknown_tags_get_an_empty_strict_schema() {
    let schema = schema_for_tag("testimonials");
    assert!(schema.strict);
    assert!(schema.required_fields().is_empty());
}
