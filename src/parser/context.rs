//! Context URL fragments (section 3).

use nom::branch::alt;
use nom::combinator::{map, not, opt, peek, verify};
use nom::sequence::{pair, preceded, terminated, tuple};

use crate::combinator::{chain, chain_some, end_of_input, list, lit, many, prefixed, suffixed, PResult};
use crate::cst::context::*;
use crate::input::Input;

use super::*;

//* ;------------------------------------------------------------------------------
//* ; 3. Context URL Fragments
//* ;------------------------------------------------------------------------------
//*
//* context         = "#" contextFragment
rule! {
    pub fn context<'a>(input) -> Context<'a> {
        let (input, (hash, fragment)) = pair(lit("#"), contextFragment)(input)?;
        Ok((input, Context { hash, fragment }))
    }
}

//* contextFragment = 'Collection($ref)'
//*                 / '$ref'
//*                 / 'Collection(Edm.EntityType)'
//*                 / 'Collection(Edm.ComplexType)'
//*                 / singletonEntity [ navigation *( containmentNavigation ) [ "/" qualifiedEntityTypeName ] ] [ selectList ]
//*                 / qualifiedTypeName [ selectList ]
//*                 / entitySet ( '/$deletedEntity' / '/$link' / '/$deletedLink' )
//*                 / entitySet keyPredicate "/" contextPropertyPath [ selectList ]
//*                 / entitySet [ selectList ] [ '/$entity' / '/$delta' ]
//
// The fragment ends the URL, and several alternatives are prefixes of later
// ones (a singleton name is an entity set name), so each alternative must reach
// the end of the input. A bare name reads as a singleton. Types go before
// singletons: `Collection(Edm.String)` would otherwise be a singleton named
// `Collection` with a select list.
rule! {
    pub fn contextFragment<'a>(input) -> ContextFragment<'a> {
        alt((
            map(whole(lit("Collection($ref)")), ContextFragment::CollectionRef),
            map(whole(lit("$ref")), ContextFragment::Ref),
            map(whole(lit("Collection(Edm.EntityType)")), ContextFragment::CollectionEntityType),
            map(whole(lit("Collection(Edm.ComplexType)")), ContextFragment::CollectionComplexType),
            map(whole(chain(qualifiedTypeName, selectList)), ContextFragment::Type),
            map(whole(singleton_context), ContextFragment::Singleton),
            map(whole(delta_context), ContextFragment::Delta),
            map(whole(property_context), ContextFragment::Property),
            map(whole(entity_set_context), ContextFragment::EntitySet),
        ))(input)
    }
}

fn whole<'a, O>(
    parser: impl FnMut(Input<'a>) -> PResult<'a, O>,
) -> impl FnMut(Input<'a>) -> PResult<'a, O> {
    terminated(parser, end_of_input)
}

fn singleton_context(input: Input<'_>) -> PResult<'_, SingletonContext<'_>> {
    let (input, (singleton, path, select)) = tuple((
        singletonEntity,
        opt(map(
            tuple((navigation, many(containmentNavigation), opt(entity_cast))),
            |(navigation, containment, cast)| SingletonPath {
                navigation,
                containment,
                cast,
            },
        )),
        opt(selectList),
    ))(input)?;
    Ok((input, SingletonContext { singleton, path, select }))
}

fn delta_context(input: Input<'_>) -> PResult<'_, DeltaContext<'_>> {
    let (input, (entity_set, kind)) = pair(
        entitySet,
        alt((lit("/$deletedEntity"), lit("/$link"), lit("/$deletedLink"))),
    )(input)?;
    Ok((input, DeltaContext { entity_set, kind }))
}

// The containment navigations of a greedy `entitySet` would take the key and
// property that follow, so here a containment is only taken when another key
// comes after it. `People(1)/Name` is a property, not a navigation.
fn property_context(input: Input<'_>) -> PResult<'_, PropertyContext<'_>> {
    let (input, (name, containment, cast)) = tuple((
        entitySetName,
        many(terminated(containmentNavigation, peek(keyPredicate))),
        opt(entity_cast),
    ))(input)?;
    let (input, (key, slash, property, select)) =
        tuple((keyPredicate, lit("/"), contextPropertyPath, opt(selectList)))(input)?;
    Ok((
        input,
        PropertyContext {
            entity_set: EntitySet {
                name,
                containment,
                cast,
            },
            key,
            slash,
            property,
            select,
        },
    ))
}

fn entity_set_context(input: Input<'_>) -> PResult<'_, EntitySetContext<'_>> {
    let (input, (entity_set, select, suffix)) = tuple((
        entitySet,
        opt(selectList),
        opt(alt((lit("/$entity"), lit("/$delta")))),
    ))(input)?;
    Ok((
        input,
        EntitySetContext {
            entity_set,
            select,
            suffix,
        },
    ))
}

// A qualified name followed by parameters is not a cast.
fn entity_cast(input: Input<'_>) -> PResult<'_, crate::cst::resource::EntityCast<'_>> {
    terminated(prefixed("/", qualifiedEntityTypeName), not(OPEN))(input)
}

//* entitySet = entitySetName *( containmentNavigation ) [ "/" qualifiedEntityTypeName ]
rule! {
    pub fn entitySet<'a>(input) -> EntitySet<'a> {
        let (input, (name, containment, cast)) =
            tuple((entitySetName, many(containmentNavigation), opt(entity_cast)))(input)?;
        Ok((input, EntitySet { name, containment, cast }))
    }
}

//* containmentNavigation = keyPredicate [ "/" qualifiedEntityTypeName ] navigation
rule! {
    pub fn containmentNavigation<'a>(input) -> ContainmentNavigation<'a> {
        let (input, (key, cast, navigation)) =
            tuple((keyPredicate, opt(entity_cast), navigation))(input)?;
        Ok((input, ContainmentNavigation { key, cast, navigation }))
    }
}

//* navigation            = *( "/" complexProperty [ "/" qualifiedComplexTypeName ] ) "/" navigationProperty
//
// A complex step is only taken when another name follows it; the last name is
// the navigation property.
rule! {
    pub fn navigation<'a>(input) -> Navigation<'a> {
        let (input, complex) = many(map(
            terminated(
                pair(
                    prefixed("/", complexProperty),
                    opt(terminated(prefixed("/", qualifiedComplexTypeName), not(OPEN))),
                ),
                peek(preceded(lit("/"), odataIdentifier)),
            ),
            |(property, cast)| ComplexStep { property, cast },
        ))(input)?;
        let (input, (slash, property)) = pair(lit("/"), navigationProperty)(input)?;
        Ok((input, Navigation { complex, slash, property }))
    }
}

//* selectList         = OPEN selectListItem *( COMMA selectListItem ) CLOSE
rule! {
    pub fn selectList<'a>(input) -> SelectList<'a> {
        let (input, (open, items, close)) = tuple((OPEN, list(selectListItem, COMMA), CLOSE))(input)?;
        Ok((input, SelectList { open, items, close }))
    }
}

//* selectListItem     = STAR ; all structural properties
//*                    / allOperationsInSchema
//*                    / [ qualifiedEntityTypeName "/" ]
//*                      ( qualifiedActionName
//*                      / qualifiedFunctionName
//*                      / selectListProperty
//*                      )
//
// As in `selectItem`, an operation is an action unless parameters follow.
rule! {
    pub fn selectListItem<'a>(input) -> SelectListItem<'a> {
        alt((
            map(STAR, SelectListItem::Star),
            map(allOperationsInSchema, SelectListItem::AllOperations),
            map(
                pair(
                    opt(suffixed(qualifiedEntityTypeName, "/")),
                    alt((
                        map(terminated(qualifiedActionName, not(OPEN)), SelectListTarget::Action),
                        map(qualifiedFunctionName, SelectListTarget::Function),
                        map(selectListProperty, SelectListTarget::Property),
                    )),
                ),
                |(type_cast, target)| SelectListItem::Path(SelectListPathItem { type_cast, target }),
            ),
        ))(input)
    }
}

//* selectListProperty = primitiveProperty
//*                    / primitiveColProperty
//*                    / navigationProperty [ "+" ] [ selectList ]
//*                    / selectPath [ "/" selectListProperty ]
//
// All four start with a name. A path or a navigation with a `+` or a nested
// list is tried before the bare name, which reads as a primitive property.
rule! {
    pub recursive fn selectListProperty<'a>(input) -> SelectListProperty<'a> {
        alt((
            map(
                chain_some(selectPath, prefixed("/", map(selectListProperty, Box::new))),
                SelectListProperty::Path,
            ),
            map(
                verify(navigation_select, |select: &NavigationSelect<'_>| {
                    select.plus.is_some() || select.select.is_some()
                }),
                SelectListProperty::Navigation,
            ),
            map(primitiveProperty, SelectListProperty::Primitive),
            map(primitiveColProperty, SelectListProperty::PrimitiveCol),
            map(navigation_select, SelectListProperty::Navigation),
        ))(input)
    }
}

fn navigation_select(input: Input<'_>) -> PResult<'_, NavigationSelect<'_>> {
    let (input, (property, plus, select)) = tuple((
        navigationProperty,
        opt(lit("+")),
        opt(map(selectList, Box::new)),
    ))(input)?;
    Ok((input, NavigationSelect { property, plus, select }))
}

//* contextPropertyPath = primitiveProperty
//*                     / primitiveColProperty
//*                     / complexColProperty
//*                     / complexProperty [ [ "/" qualifiedComplexTypeName ] "/" contextPropertyPath ]
//
// A complex property with a sub-path goes first; a bare name is primitive.
rule! {
    pub recursive fn contextPropertyPath<'a>(input) -> ContextPropertyPath<'a> {
        alt((
            map(
                chain_some(complexProperty, context_property_tail),
                ContextPropertyPath::Complex,
            ),
            map(primitiveProperty, ContextPropertyPath::Primitive),
            map(primitiveColProperty, ContextPropertyPath::PrimitiveCol),
            map(complexColProperty, ContextPropertyPath::ComplexCol),
        ))(input)
    }
}

fn context_property_tail(input: Input<'_>) -> PResult<'_, ContextPropertyTail<'_>> {
    let (input, (cast, slash, path)) = tuple((
        opt(terminated(prefixed("/", qualifiedComplexTypeName), not(OPEN))),
        lit("/"),
        contextPropertyPath,
    ))(input)?;
    Ok((
        input,
        ContextPropertyTail {
            cast,
            slash,
            path: Box::new(path),
        },
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cst::Syntax;

    fn fragment(text: &str) -> ContextFragment<'_> {
        let (rest, fragment) = contextFragment(Input::new(text)).unwrap();
        assert!(rest.is_empty());
        assert_eq!(fragment.to_source(), text);
        fragment
    }

    #[test]
    fn fixed_fragments() {
        assert!(matches!(fragment("$ref"), ContextFragment::Ref(_)));
        assert!(matches!(fragment("Collection($ref)"), ContextFragment::CollectionRef(_)));
        assert!(matches!(
            fragment("Collection(Edm.EntityType)"),
            ContextFragment::CollectionEntityType(_)
        ));
        assert!(matches!(
            fragment("Collection(Edm.ComplexType)"),
            ContextFragment::CollectionComplexType(_)
        ));
    }

    #[test]
    fn bare_name_is_a_singleton() {
        match fragment("Me") {
            ContextFragment::Singleton(singleton) => {
                assert_eq!(singleton.singleton.name(), "Me");
                assert!(singleton.path.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
        match fragment("Me/Manager(Name)") {
            ContextFragment::Singleton(singleton) => {
                assert_eq!(singleton.path.unwrap().navigation.property.name(), "Manager");
                assert_eq!(singleton.select.unwrap().iter().count(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn entity_set_suffixes() {
        match fragment("People/$entity") {
            ContextFragment::EntitySet(context) => {
                assert_eq!(context.entity_set.name.name(), "People");
                assert_eq!(context.suffix.unwrap().text(), "/$entity");
            }
            other => panic!("unexpected {other:?}"),
        }
        match fragment("People(Name,Emails)/$delta") {
            ContextFragment::EntitySet(context) => {
                assert_eq!(context.select.unwrap().iter().count(), 2)
            }
            other => panic!("unexpected {other:?}"),
        }
        match fragment("People/$deletedLink") {
            ContextFragment::Delta(delta) => assert_eq!(delta.kind.text(), "/$deletedLink"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn types_and_properties() {
        assert!(matches!(fragment("Model.Person"), ContextFragment::Type(_)));
        assert!(matches!(fragment("Collection(Edm.String)"), ContextFragment::Type(_)));
        match fragment("People(1)/Address/City") {
            ContextFragment::Property(property) => {
                assert!(property.entity_set.containment.is_empty());
                assert!(matches!(property.property, ContextPropertyPath::Complex(_)));
            }
            other => panic!("unexpected {other:?}"),
        }
        match fragment("People(1)/Trips(2)/Budget") {
            ContextFragment::Property(property) => {
                assert_eq!(property.entity_set.navigation_names(), vec!["Trips"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn select_lists() {
        let (rest, list) = selectList(Input::new("(*,Model.*,Friends+(Name),Address/City,Model.Reset)")).unwrap();
        assert!(rest.is_empty());
        let items: Vec<_> = list.iter().collect();
        assert_eq!(items.len(), 5);
        assert!(matches!(items[0], SelectListItem::Star(_)));
        assert!(matches!(items[1], SelectListItem::AllOperations(_)));
        assert!(matches!(
            items[2],
            SelectListItem::Path(SelectListPathItem {
                target: SelectListTarget::Property(SelectListProperty::Navigation(_)),
                ..
            })
        ));
        assert!(matches!(
            items[3],
            SelectListItem::Path(SelectListPathItem {
                target: SelectListTarget::Property(SelectListProperty::Path(_)),
                ..
            })
        ));
        assert!(matches!(
            items[4],
            SelectListItem::Path(SelectListPathItem {
                target: SelectListTarget::Action(_),
                ..
            })
        ));
    }

    #[test]
    fn fragment_must_end_the_input() {
        assert!(contextFragment(Input::new("People/$entity(")).is_err());
        assert!(contextFragment(Input::new("People/$entity/")).is_err());
        // `$entity` there reads as a key segment followed by a property.
        assert!(contextFragment(Input::new("People/$entity/x")).is_ok());
        assert!(context(Input::new("People")).is_err());
        assert!(context(Input::new("#People")).is_ok());
    }
}
