/// Declares a struct and implements [`FitType`](crate::FitType) for it.
///
/// Members are matched in declaration order. A member without annotation is
/// matched by its lowercase name; `#[prefix("literal")]` matches every column
/// starting with the literal, and `#[prefix("literal*")]` builds a collection
/// with one element per index group. Doc comments go before the annotation.
///
/// ```
/// use csv_fit::{TimeSpan, coerce, fit_type};
///
/// fit_type! {
///     #[derive(Debug)]
///     pub struct Lane {
///         pub place: u32,
///         pub time: TimeSpan,
///         /// One entry per `laptime<n>` column.
///         #[prefix("laptime*")]
///         pub lap_times: Vec<TimeSpan>,
///     }
/// }
///
/// let record = [
///     ("place", "1"),
///     ("time", "00:01:30"),
///     ("laptime1", "00:00:45"),
///     ("laptime2", "00:00:45"),
/// ]
/// .into_iter()
/// .collect();
/// let lane: Lane = coerce(&record).unwrap();
/// assert_eq!(lane.lap_times.len(), 2);
/// ```
#[macro_export]
macro_rules! fit_type {
    (@member $field:ident, $ty:ty) => {
        $crate::MemberDescriptor::implicit::<$ty>(::std::stringify!($field))
    };
    (@member $field:ident, $ty:ty, $prefix:literal) => {
        $crate::MemberDescriptor::prefixed::<$ty>(::std::stringify!($field), $prefix)
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[doc = $doc:literal])*
                $(#[prefix($prefix:literal)])?
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[doc = $doc])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::FitType for $name {
            fn describe() -> ::std::vec::Vec<$crate::MemberDescriptor> {
                ::std::vec![
                    $( $crate::fit_type!(@member $field, $ty $(, $prefix)?), )*
                ]
            }

            fn fit(
                fields: &mut $crate::Fields<'_>,
            ) -> ::std::result::Result<Self, $crate::TypeFittingError> {
                ::std::result::Result::Ok(Self {
                    $(
                        $field: fields.member::<$ty>(
                            &$crate::fit_type!(@member $field, $ty $(, $prefix)?),
                        )?,
                    )*
                })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{MemberKind, NamingPattern, TypeFittingError, coerce, describe};

    fit_type! {
        #[derive(Debug, PartialEq)]
        struct Engine {
            horsepower: u32,
            mpg: f64,
        }
    }

    fit_type! {
        #[derive(Debug, PartialEq)]
        struct Car {
            /// Paint colour as written in the sheet.
            color: String,
            #[prefix("engine")]
            engine: Engine,
            #[prefix("seat*")]
            seats: Vec<String>,
        }
    }

    #[test]
    fn describe_lists_members_in_declaration_order() {
        let members = describe::<Car>();
        let names = members.iter().map(|m| m.name).collect::<Vec<_>>();
        assert_eq!(names, vec!["color", "engine", "seats"]);
        assert_eq!(members[0].pattern, NamingPattern::implicit("color"));
        assert_eq!(members[1].kind, MemberKind::Nested);
        assert_eq!(members[2].kind, MemberKind::Collection);
        assert_eq!(describe::<Car>(), members);
    }

    #[test]
    fn nested_prefix_builds_sub_object() {
        let record = [
            ("Engine_Horsepower", "150"),
            ("Color", "red"),
            ("engine_mpg", "31.5"),
            ("seat1", "leather"),
            ("seat2", "cloth"),
        ]
        .into_iter()
        .collect();
        let car: Car = coerce(&record).unwrap();
        assert_eq!(
            car,
            Car {
                color: "red".into(),
                engine: Engine {
                    horsepower: 150,
                    mpg: 31.5
                },
                seats: vec!["leather".into(), "cloth".into()],
            }
        );
    }

    #[test]
    fn nested_failure_is_reported_under_member_name() {
        let record = [("color", "red"), ("engine_mpg", "31.5"), ("engine_hp", "150")]
            .into_iter()
            .collect();
        let err = coerce::<Car>(&record).unwrap_err();
        assert_eq!(err.path(), vec!["engine"]);
        assert!(matches!(
            err.root_cause(),
            TypeFittingError::MissingColumn { member, .. } if member == "horsepower"
        ));
    }
}
