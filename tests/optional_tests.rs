use rx_optional::{OptionalError, RxOptional};

#[test]
fn test_of_with_value() {
    let optional = RxOptional::of("a");
    assert!(optional.is_present());
    assert_eq!(optional.get(), Ok(&"a"));
}

#[test]
fn test_try_of_with_absent_value() {
    let result = RxOptional::<&str>::try_of(None);
    assert!(matches!(result, Err(OptionalError::InvalidArgument(_))));
}

#[test]
fn test_try_of_with_present_value() {
    assert_eq!(RxOptional::try_of(Some(5)), Ok(RxOptional::of(5)));
}

#[test]
fn test_empty() {
    let empty = RxOptional::<i32>::empty();
    assert!(!empty.is_present());
    assert!(empty.is_empty());
    assert_eq!(empty.get(), Err(OptionalError::EmptyValueAccess));
    assert_eq!(empty.into_value(), Err(OptionalError::EmptyValueAccess));
}

#[test]
fn test_of_nullable() {
    assert!(!RxOptional::<&str>::of_nullable(None).is_present());
    assert!(RxOptional::of_nullable(Some("a")).is_present());
    assert_eq!(RxOptional::maybe(Some(1)), RxOptional::of_nullable(Some(1)));
    assert_eq!(RxOptional::<i32>::maybe(None), RxOptional::empty());
}

#[test]
fn test_default_and_conversions() {
    assert_eq!(RxOptional::<u8>::default(), RxOptional::empty());
    assert_eq!(RxOptional::from(Some(3)), RxOptional::of(3));

    let back: Option<i32> = RxOptional::of(3).into();
    assert_eq!(back, Some(3));
    assert_eq!(RxOptional::of(3).as_ref().into_option(), Some(&3));
}

#[test]
fn test_iteration() {
    let collected: Vec<i32> = RxOptional::of(4).into_iter().collect();
    assert_eq!(collected, vec![4]);
    assert_eq!(RxOptional::<i32>::empty().iter().count(), 0);

    let mut seen = Vec::new();
    for v in &RxOptional::of("x") {
        seen.push(*v);
    }
    assert_eq!(seen, vec!["x"]);
}

#[test]
fn test_filter_pass_predicate() {
    let optional = RxOptional::of("a").filter(|v| *v == "a");
    assert_eq!(optional.get(), Ok(&"a"));
}

#[test]
fn test_filter_fail_predicate() {
    let optional = RxOptional::of("a").filter(|v| *v == "b");
    assert_eq!(optional, RxOptional::empty());
}

#[test]
fn test_try_filter_absent_predicate_value_present() {
    let result = RxOptional::of("a").try_filter(None::<fn(&&str) -> bool>);
    assert!(matches!(result, Err(OptionalError::InvalidArgument(_))));
}

#[test]
fn test_try_filter_absent_predicate_value_absent() {
    let result = RxOptional::<&str>::empty().try_filter(None::<fn(&&str) -> bool>);
    assert_eq!(result, Ok(RxOptional::empty()));
}

#[test]
fn test_map() {
    assert_eq!(RxOptional::of("a").map(|_| "b"), RxOptional::of("b"));
    assert_eq!(RxOptional::<i32>::empty().map(|d| d), RxOptional::empty());
}

#[test]
fn test_map_short_circuits_on_empty() {
    let mapped = RxOptional::<i32>::empty().map(|_| -> i32 { panic!("mapper must not run") });
    assert_eq!(mapped, RxOptional::empty());
}

#[test]
fn test_try_map_short_circuits_absent_mapper() {
    let mapped = RxOptional::<i32>::empty().try_map(None::<fn(i32) -> Option<i32>>);
    assert_eq!(mapped, Ok(RxOptional::empty()));
}

#[test]
fn test_try_map_absent_mapper_value_present() {
    let mapped = RxOptional::of(1).try_map(None::<fn(i32) -> Option<i32>>);
    assert!(matches!(mapped, Err(OptionalError::InvalidArgument(_))));
}

#[test]
fn test_try_map_rejects_absent_result() {
    let mapped = RxOptional::of(1).try_map(Some(|_: i32| None::<String>));
    assert_eq!(
        mapped,
        Err(OptionalError::InvalidArgument("mapper returned an absent value".to_string()))
    );
}

#[test]
fn test_try_map_present_result() {
    let mapped = RxOptional::of(2).try_map(Some(|v: i32| Some(v * 10)));
    assert_eq!(mapped, Ok(RxOptional::of(20)));
}

#[test]
fn test_flat_map() {
    assert_eq!(RxOptional::of("a").flat_map(|_| RxOptional::of("b")), RxOptional::of("b"));
    assert_eq!(
        RxOptional::of("a").flat_map(|_| RxOptional::<&str>::empty()),
        RxOptional::empty()
    );
}

#[test]
fn test_flat_map_degrades_absent_result_to_empty() {
    let mapped = RxOptional::of(1).flat_map(|_| RxOptional::<String>::of_nullable(None));
    assert!(mapped.is_empty());
}

#[test]
fn test_try_flat_map() {
    let absent = RxOptional::<i32>::empty().try_flat_map(None::<fn(i32) -> RxOptional<i32>>);
    assert_eq!(absent, Ok(RxOptional::empty()));

    let missing = RxOptional::of(1).try_flat_map(None::<fn(i32) -> RxOptional<i32>>);
    assert!(matches!(missing, Err(OptionalError::InvalidArgument(_))));

    let mapped = RxOptional::of(1).try_flat_map(Some(|v: i32| RxOptional::of(v + 1)));
    assert_eq!(mapped, Ok(RxOptional::of(2)));
}

#[test]
fn test_flatten() {
    assert_eq!(RxOptional::of(RxOptional::of(1)).flatten(), RxOptional::of(1));
    assert_eq!(RxOptional::of(RxOptional::<i32>::empty()).flatten(), RxOptional::empty());
    assert_eq!(RxOptional::<RxOptional<i32>>::empty().flatten(), RxOptional::empty());
}

#[test]
fn test_or() {
    assert_eq!(RxOptional::<&str>::empty().or(Some("a")), RxOptional::of("a"));
    assert_eq!(RxOptional::<&str>::empty().or(None), RxOptional::empty());
    assert_eq!(RxOptional::of("x").or(Some("a")), RxOptional::of("x"));
}

#[test]
fn test_or_get_is_lazy() {
    let present = RxOptional::of(1).or_get(|| -> Option<i32> { panic!("supplier must not run") });
    assert_eq!(present, RxOptional::of(1));
    assert_eq!(RxOptional::empty().or_get(|| Some(2)), RxOptional::of(2));
}

#[test]
fn test_or_else() {
    assert_eq!(RxOptional::<&str>::empty().or_else("default"), "default");
    assert_eq!(RxOptional::of("a").or_else("default"), "a");
}

#[test]
fn test_or_else_get() {
    assert_eq!(RxOptional::<String>::empty().or_else_get(|| "a".to_string()), "a");
    assert_eq!(RxOptional::of(1).or_else_get(|| -> i32 { panic!("supplier must not run") }), 1);
}

#[test]
fn test_try_or_else_get() {
    assert_eq!(RxOptional::of(1).try_or_else_get(None::<fn() -> i32>), Ok(1));
    assert!(matches!(
        RxOptional::<i32>::empty().try_or_else_get(None::<fn() -> i32>),
        Err(OptionalError::InvalidArgument(_))
    ));
    assert_eq!(RxOptional::<i32>::empty().try_or_else_get(Some(|| 9)), Ok(9));
}

#[test]
fn test_or_else_err() {
    assert_eq!(RxOptional::of(1).or_else_err(|| "missing"), Ok(1));
    assert_eq!(RxOptional::<i32>::empty().or_else_err(|| "missing"), Err("missing"));
}

#[test]
fn test_equality() {
    assert_eq!(RxOptional::<&str>::of_nullable(None), RxOptional::empty());
    assert_eq!(RxOptional::of("a"), RxOptional::of("a"));
    assert_ne!(RxOptional::of("a"), RxOptional::of("b"));
    assert_ne!(RxOptional::of("a"), RxOptional::empty());
    assert_ne!(RxOptional::empty(), RxOptional::of("a"));
}

#[test]
fn test_equal_containers_share_a_hash_set_slot() {
    use std::collections::HashSet;

    let mut set = HashSet::new();
    set.insert(RxOptional::of("a"));
    set.insert(RxOptional::of("a"));
    set.insert(RxOptional::empty());
    set.insert(RxOptional::of_nullable(None));
    assert_eq!(set.len(), 2);
}

#[test]
fn test_display() {
    assert_eq!(RxOptional::<String>::empty().to_string(), "Optional[empty]");
    assert_eq!(RxOptional::of("a").to_string(), "Optional[a]");
    assert_eq!(RxOptional::of(42).to_string(), "Optional[42]");
    assert_eq!(RxOptional::of(RxOptional::of(1)).to_string(), "Optional[Optional[1]]");
}

#[test]
fn test_combinators_do_not_touch_the_original() {
    let original = RxOptional::of(5);
    let mapped = original.map(|v| v * 2);
    let filtered = original.filter(|v| *v > 10);
    assert_eq!(original, RxOptional::of(5));
    assert_eq!(mapped, RxOptional::of(10));
    assert_eq!(filtered, RxOptional::empty());
}

#[test]
fn test_async_combinators() {
    tokio_test::block_on(async {
        let mapped = RxOptional::of(2).map_async(|v| async move { v + 1 }).await;
        assert_eq!(mapped, RxOptional::of(3));

        let kept = RxOptional::of(2)
            .filter_async(|v| {
                let even = *v % 2 == 0;
                async move { even }
            })
            .await;
        assert_eq!(kept, RxOptional::of(2));

        let dropped = RxOptional::of(3)
            .filter_async(|v| {
                let even = *v % 2 == 0;
                async move { even }
            })
            .await;
        assert_eq!(dropped, RxOptional::empty());

        let flat = RxOptional::of("a")
            .flat_map_async(|v| async move { RxOptional::of(v.len()) })
            .await;
        assert_eq!(flat, RxOptional::of(1));

        let skipped = RxOptional::<i32>::empty()
            .map_async(|v| async move {
                if v >= 0 {
                    panic!("mapper must not run");
                }
                v
            })
            .await;
        assert_eq!(skipped, RxOptional::empty());
    });
}
