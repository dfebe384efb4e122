use ferrofem_tensor::{Component, Error};

#[test]
fn component_from_index() {
    assert_eq!(Component::try_from(0), Ok(Component::X));
    assert_eq!(Component::try_from(1), Ok(Component::Y));
    assert_eq!(Component::try_from(2), Ok(Component::Z));
    assert_eq!(Component::try_from(3), Err(Error::ComponentOutOfRange(3)));
}

#[test]
fn component_index_round_trips_through_all() {
    for (index, component) in Component::ALL.into_iter().enumerate() {
        assert_eq!(component.index(), index);
        assert_eq!(usize::from(component), index);
    }
}

#[test]
fn component_deserializes_from_integer() {
    let component: Component = serde_json::from_str("2").unwrap();
    assert_eq!(component, Component::Z);
    assert_eq!(serde_json::to_string(&Component::Y).unwrap(), "1");

    let error = serde_json::from_str::<Component>("5").unwrap_err();
    assert!(error.to_string().contains("out of range"));
}
