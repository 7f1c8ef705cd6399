//! Header values (section 8).

use nom::branch::alt;
use nom::combinator::{map, opt};
use nom::sequence::{pair, tuple};

use crate::combinator::{lexeme, lit, lit_ci, list, many, opt_some, prefixed, some, PResult};
use crate::cst::header::*;
use crate::cst::Token;
use crate::input::Input;

use super::*;

//* ;------------------------------------------------------------------------------
//* ; 8. Header values
//* ;------------------------------------------------------------------------------
//*
//* header = content-id
//*        / entityid
//*        / isolation
//*        / odata-maxversion
//*        / odata-version
//*        / prefer
rule! {
    pub fn header<'a>(input) -> Header<'a> {
        alt((
            map(content_id, Header::ContentId),
            map(entityid, Header::EntityId),
            map(isolation, Header::Isolation),
            map(odata_maxversion, Header::MaxVersion),
            map(odata_version, Header::Version),
            map(prefer, Header::Prefer),
        ))(input)
    }
}

/// `[ "OData-" ] name ":" OWS`, the prefix only where `odata_prefix` allows it.
fn header_name<'a>(
    odata_prefix: bool,
    name: &'static str,
) -> impl Fn(Input<'a>) -> PResult<'a, HeaderName<'a>> {
    move |input: Input<'a>| {
        let (input, prefix) = if odata_prefix {
            opt(lit_ci("OData-"))(input)?
        } else {
            (input, None)
        };
        let (input, (name, colon, ows)) = tuple((lit_ci(name), lit(":"), OWS))(input)?;
        Ok((
            input,
            HeaderName {
                prefix,
                name,
                colon,
                ows,
            },
        ))
    }
}

//* content-id = "Content-ID" ":" OWS request-id
rule! {
    pub fn content_id<'a>(input) -> ContentId<'a> {
        let (input, (name, request_id)) = pair(header_name(false, "Content-ID"), request_id)(input)?;
        Ok((input, ContentId { name, request_id }))
    }
}

//* request-id = 1*unreserved
rule! {
    pub fn request_id<'a>(input) -> RequestId<'a> {
        let (input, text) = lexeme(some(unreserved))(input)?;
        Ok((input, RequestId { text }))
    }
}

//* entityid   = [ "OData-" ] "EntityID" ":" OWS IRI-in-header
rule! {
    pub fn entityid<'a>(input) -> EntityId<'a> {
        let (input, (name, text)) = pair(header_name(true, "EntityID"), IRI_in_header)(input)?;
        Ok((
            input,
            EntityId {
                name,
                iri: IriInHeader { text },
            },
        ))
    }
}

//* isolation  = [ "OData-" ] "Isolation" ":" OWS "snapshot"
rule! {
    pub fn isolation<'a>(input) -> Isolation<'a> {
        let (input, (name, snapshot)) =
            pair(header_name(true, "Isolation"), lit_ci("snapshot"))(input)?;
        Ok((input, Isolation { name, snapshot }))
    }
}

//* odata-maxversion = "OData-MaxVersion" ":" OWS 1*DIGIT "." 1*DIGIT
rule! {
    pub fn odata_maxversion<'a>(input) -> OdataMaxVersion<'a> {
        let (input, (name, major, dot, minor)) = tuple((
            header_name(false, "OData-MaxVersion"),
            digits(1, None),
            lit("."),
            digits(1, None),
        ))(input)?;
        Ok((
            input,
            OdataMaxVersion {
                name,
                major,
                dot,
                minor,
            },
        ))
    }
}

//* odata-version    = "OData-Version"    ":" OWS "4.0" [ oneToNine ]
rule! {
    pub fn odata_version<'a>(input) -> OdataVersion<'a> {
        let (input, (name, version, revision)) =
            tuple((header_name(false, "OData-Version"), lit("4.0"), opt(oneToNine)))(input)?;
        Ok((
            input,
            OdataVersion {
                name,
                version,
                revision,
            },
        ))
    }
}

//* prefer     = "Prefer" ":" OWS preference *( COMMA preference )
rule! {
    pub fn prefer<'a>(input) -> Prefer<'a> {
        let (input, (name, preferences)) =
            pair(header_name(false, "Prefer"), list(preference, COMMA))(input)?;
        Ok((input, Prefer { name, preferences }))
    }
}

//* preference = allowEntityReferencesPreference
//*            / callbackPreference
//*            / continueOnErrorPreference
//*            / includeAnnotationsPreference
//*            / maxpagesizePreference
//*            / respondAsyncPreference
//*            / returnPreference
//*            / trackChangesPreference
//*            / waitPreference
//*            ; and everything allowed by http://tools.ietf.org/html/draft-snell-http-prefer-18
//*            ; / token [ EQ-h word ] *( OWS ";" [ OWS parameter ] )
rule! {
    pub fn preference<'a>(input) -> Preference<'a> {
        alt((
            map(allowEntityReferencesPreference, Preference::AllowEntityReferences),
            map(callbackPreference, Preference::Callback),
            map(continueOnErrorPreference, Preference::ContinueOnError),
            map(includeAnnotationsPreference, Preference::IncludeAnnotations),
            map(maxpagesizePreference, Preference::Maxpagesize),
            map(respondAsyncPreference, Preference::RespondAsync),
            map(returnPreference, Preference::Return),
            map(trackChangesPreference, Preference::TrackChanges),
            map(waitPreference, Preference::Wait),
        ))(input)
    }
}

/// `[ "odata." ] name`
fn preference_name<'a>(name: &'static str) -> impl Fn(Input<'a>) -> PResult<'a, PreferenceName<'a>> {
    move |input: Input<'a>| {
        let (input, (odata, name)) = pair(opt(lit_ci("odata.")), lit_ci(name))(input)?;
        Ok((input, PreferenceName { odata, name }))
    }
}

//* allowEntityReferencesPreference = [ "odata." ] "allow-entityreferences"
rule! {
    pub fn allowEntityReferencesPreference<'a>(input) -> PreferenceName<'a> {
        preference_name("allow-entityreferences")(input)
    }
}

//* callbackPreference = [ "odata." ] "callback" OWS ";" OWS "url" EQ-h DQUOTE URI DQUOTE
rule! {
    pub fn callbackPreference<'a>(input) -> CallbackPreference<'a> {
        let (input, (name, before_semi, semi, after_semi, url, eq)) = tuple((
            preference_name("callback"),
            OWS,
            lit(";"),
            OWS,
            lit_ci("url"),
            EQ_h,
        ))(input)?;
        let (input, (open_quote, uri, close_quote)) = tuple((DQUOTE, URI, DQUOTE))(input)?;
        Ok((
            input,
            CallbackPreference {
                name,
                before_semi,
                semi,
                after_semi,
                url,
                eq,
                open_quote,
                uri,
                close_quote,
            },
        ))
    }
}

//* continueOnErrorPreference = [ "odata." ] "continue-on-error" [ EQ-h booleanValue ]
rule! {
    pub fn continueOnErrorPreference<'a>(input) -> ContinueOnErrorPreference<'a> {
        let (input, (name, value)) = pair(
            preference_name("continue-on-error"),
            opt(map(pair(EQ_h, booleanValue), |(eq, value)| Setting { eq, value })),
        )(input)?;
        Ok((input, ContinueOnErrorPreference { name, value }))
    }
}

//* includeAnnotationsPreference = [ "odata." ] "include-annotations" EQ-h DQUOTE annotationsList DQUOTE
rule! {
    pub fn includeAnnotationsPreference<'a>(input) -> IncludeAnnotationsPreference<'a> {
        let (input, (name, eq, open_quote, annotations, close_quote)) = tuple((
            preference_name("include-annotations"),
            EQ_h,
            DQUOTE,
            annotationsList,
            DQUOTE,
        ))(input)?;
        Ok((
            input,
            IncludeAnnotationsPreference {
                name,
                eq,
                open_quote,
                annotations,
                close_quote,
            },
        ))
    }
}

//* annotationsList      = annotationIdentifier *(COMMA annotationIdentifier)
rule! {
    pub fn annotationsList<'a>(input) -> AnnotationsList<'a> {
        list(annotationIdentifier, COMMA)(input)
    }
}

//* annotationIdentifier = [ excludeOperator ]
//*                        ( STAR
//*                        / namespace "." ( termName / STAR )
//*                        )
//*                        [ "#" odataIdentifier ]
rule! {
    pub fn annotationIdentifier<'a>(input) -> AnnotationIdentifier<'a> {
        let (input, (exclude, target, qualifier)) = tuple((
            opt(excludeOperator),
            alt((
                map(STAR, AnnotationTarget::All),
                map(
                    tuple((
                        namespace,
                        lit("."),
                        alt((map(termName, TermOrStar::Term), map(STAR, TermOrStar::All))),
                    )),
                    |(namespace, dot, term)| {
                        AnnotationTarget::Namespace(NamespaceTerms { namespace, dot, term })
                    },
                ),
            )),
            opt(prefixed("#", odataIdentifier)),
        ))(input)?;
        Ok((
            input,
            AnnotationIdentifier {
                exclude,
                target,
                qualifier,
            },
        ))
    }
}

//* excludeOperator      = "-"
pub fn excludeOperator(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lit("-")(input)
}

//* maxpagesizePreference = [ "odata." ] "maxpagesize" EQ-h oneToNine *DIGIT
rule! {
    pub fn maxpagesizePreference<'a>(input) -> MaxpagesizePreference<'a> {
        let (input, (name, eq, size)) = tuple((
            preference_name("maxpagesize"),
            EQ_h,
            lexeme(pair(oneToNine, many(DIGIT))),
        ))(input)?;
        Ok((input, MaxpagesizePreference { name, eq, size }))
    }
}

//* respondAsyncPreference = "respond-async"
pub fn respondAsyncPreference(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lit_ci("respond-async")(input)
}

//* returnPreference = "return" EQ-h ( 'representation' / 'minimal' )
rule! {
    pub fn returnPreference<'a>(input) -> ReturnPreference<'a> {
        let (input, (name, eq, value)) = tuple((
            lit_ci("return"),
            EQ_h,
            alt((lit("representation"), lit("minimal"))),
        ))(input)?;
        Ok((input, ReturnPreference { name, eq, value }))
    }
}

//* trackChangesPreference = [ "odata." ] "track-changes"
rule! {
    pub fn trackChangesPreference<'a>(input) -> PreferenceName<'a> {
        preference_name("track-changes")(input)
    }
}

//* waitPreference = "wait" EQ-h 1*DIGIT
rule! {
    pub fn waitPreference<'a>(input) -> WaitPreference<'a> {
        let (input, (name, eq, seconds)) = tuple((lit_ci("wait"), EQ_h, digits(1, None)))(input)?;
        Ok((input, WaitPreference { name, eq, seconds }))
    }
}

//* OWS   = *( SP / HTAB )  ; "optional" whitespace
pub fn OWS(input: Input<'_>) -> PResult<'_, Ows<'_>> {
    let (input, text) = opt_some(lexeme(some(alt((SP, HTAB)))))(input)?;
    Ok((input, Ows { text }))
}

//* BWS-h = *( SP / HTAB )  ; "bad" whitespace in header values
pub fn BWS_h(input: Input<'_>) -> PResult<'_, Ows<'_>> {
    OWS(input)
}

//* EQ-h  = BWS-h EQ BWS-h
rule! {
    pub fn EQ_h<'a>(input) -> EqH<'a> {
        let (input, (before, eq, after)) = tuple((BWS_h, EQ, BWS_h))(input)?;
        Ok((input, EqH { before, eq, after }))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cst::Syntax;

    fn parse(text: &str) -> Header<'_> {
        let (rest, header) = header(Input::new(text)).unwrap();
        assert!(rest.is_empty(), "unparsed {:?}", rest.as_str());
        assert_eq!(header.to_source(), text);
        header
    }

    #[test]
    fn versions() {
        match parse("OData-Version: 4.01") {
            Header::Version(version) => {
                assert_eq!(version.version.text(), "4.0");
                assert_eq!(version.revision.unwrap().text(), "1");
            }
            other => panic!("unexpected {other:?}"),
        }
        match parse("OData-MaxVersion:4.0") {
            Header::MaxVersion(version) => assert_eq!(version.version(), Some((4, 0))),
            other => panic!("unexpected {other:?}"),
        }
        assert!(header(Input::new("OData-Version: 3.0")).is_err());
    }

    #[test]
    fn names_ignore_case_and_take_an_optional_prefix() {
        match parse("odata-isolation: Snapshot") {
            Header::Isolation(isolation) => {
                assert!(isolation.name.prefix.is_some());
                assert_eq!(isolation.name.as_str(), "isolation");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(parse("Isolation: snapshot"), Header::Isolation(_)));
        assert!(matches!(
            parse("EntityID: http://host/service/People(1)"),
            Header::EntityId(_)
        ));
        match parse("Content-ID: 1.a~b") {
            Header::ContentId(id) => assert_eq!(id.request_id.as_str(), "1.a~b"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn preferences() {
        let header = parse(
            "Prefer: return=minimal,odata.maxpagesize=50,respond-async,wait = 10,continue-on-error=false",
        );
        let prefer = match header {
            Header::Prefer(prefer) => prefer,
            other => panic!("unexpected {other:?}"),
        };
        let preferences: Vec<_> = prefer.preferences.iter().collect();
        assert_eq!(preferences.len(), 5);
        match preferences[1] {
            Preference::Maxpagesize(size) => assert_eq!(size.value(), Some(50)),
            other => panic!("unexpected {other:?}"),
        }
        match preferences[3] {
            Preference::Wait(wait) => assert_eq!(wait.value(), Some(10)),
            other => panic!("unexpected {other:?}"),
        }
        assert!(maxpagesizePreference(Input::new("maxpagesize=0")).is_err());
        assert!(returnPreference(Input::new("return=Minimal")).is_err());
    }

    #[test]
    fn annotations_and_callbacks() {
        parse("Prefer: odata.include-annotations=\"-*,display.*,Org.OData.Core.Description#Short\"");
        let (_, annotation) = annotationIdentifier(Input::new("Org.OData.Core.Description")).unwrap();
        match annotation.target {
            AnnotationTarget::Namespace(terms) => {
                assert_eq!(terms.namespace.name(), "Org.OData.Core");
                assert!(matches!(terms.term, TermOrStar::Term(_)));
            }
            other => panic!("unexpected {other:?}"),
        }
        match parse("Prefer: odata.callback; url=\"http://host/callback?id=1\"") {
            Header::Prefer(prefer) => {
                assert!(matches!(prefer.preferences.first, Preference::Callback(_)))
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
