use super::*;
use pretty_assertions::assert_eq;

#[test]
fn parse_reference() {
    assert_eq!(
        ResourceRef::parse("File[/etc/motd]"),
        Some(ResourceRef::new("File", "/etc/motd"))
    );
    assert_eq!(
        ResourceRef::parse("Apache::Vhost[www]"),
        Some(ResourceRef::new("Apache::Vhost", "www"))
    );
}

#[test]
fn parse_rejects_malformed_references() {
    assert_eq!(ResourceRef::parse("File"), None);
    assert_eq!(ResourceRef::parse("File[/tmp"), None);
    assert_eq!(ResourceRef::parse("[x]"), None);
    assert_eq!(ResourceRef::parse("File[]"), None);
}

#[test]
fn display_round_trip() {
    let reference = ResourceRef::new("Package", "nginx");
    assert_eq!(reference.to_string(), "Package[nginx]");
    assert_eq!(ResourceRef::parse(&reference.to_string()), Some(reference));
}

#[test]
fn builder_sets_parameters() {
    let resource = Resource::new("File", "/tmp/x").with_param("ensure", "present");
    assert_eq!(
        resource.parameters.get("ensure"),
        Some(&Value::from("present"))
    );
    assert!(!resource.exported);
    assert!(!resource.is_virtual);
}
