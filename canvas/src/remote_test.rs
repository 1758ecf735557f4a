use super::*;

#[test]
fn teleport_url_prefixes_the_locator() {
    let url = teleport_url(32270, "?area=Celestia/1-City&side=A&level=r2&x=320&y=0");
    assert_eq!(
        url,
        "http://localhost:32270/tp?area=Celestia/1-City&side=A&level=r2&x=320&y=0"
    );
}

#[test]
fn focus_url_targets_the_same_port() {
    assert_eq!(focus_url(9000), "http://localhost:9000/focus");
}

#[test]
fn effective_port_defaults_to_the_companion_port() {
    assert_eq!(effective_port(None), 32270);
    assert_eq!(effective_port(Some(8080)), 8080);
}
