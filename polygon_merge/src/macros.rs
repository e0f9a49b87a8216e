/// Macro used for test assertions.
#[doc(hidden)]
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(left_val.fuzzy_eq(*right_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq(right)`
  left: `{:?}`,
 right: `{:?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                if !(left_val.fuzzy_eq_eps(*right_val, *eps_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq_eps(right, eps)`
  left: `{:?}`,
 right: `{:?}`
 eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}

/// Macro used for implementing ring macros. Used for extracting macro repetition count for
/// reserving capacity up front.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Construct a closed [Ring](crate::Ring) from a list of (x, y) tuples. The first point is
/// repeated at the end unless already given.
///
/// # Examples
///
/// ```
/// # use polygon_merge::ring;
/// # use polygon_merge::core::math::Vector2;
/// let r = ring![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)];
/// assert_eq!(r.len(), 4);
/// assert!(r.is_closed());
/// assert_eq!(r.points[3], Vector2::new(0.0, 0.0));
/// ```
#[macro_export]
macro_rules! ring {
    ($( $x:expr ),* $(,)?) => {
        {
            let size = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut points = ::std::vec::Vec::with_capacity(size + 1);
            $(
                points.push($crate::core::math::Vector2::new($x.0, $x.1));
            )*
            $crate::Ring::from_open(points)
        }
    };
}

/// Construct a [Polygon](crate::Polygon) from bracketed lists of (x, y) tuples, the first list is
/// the outer ring and any following lists are holes.
///
/// # Examples
///
/// ```
/// # use polygon_merge::polygon;
/// let p = polygon![
///     [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
///     [(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 1.0)],
/// ];
/// assert_eq!(p.rings.len(), 2);
/// assert_eq!(p.holes().len(), 1);
/// ```
#[macro_export]
macro_rules! polygon {
    ($( [ $( $x:expr ),* $(,)? ] ),+ $(,)?) => {
        $crate::Polygon::new(::std::vec![ $( $crate::ring![ $( $x ),* ] ),+ ])
    };
}
