// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "event-tracing")] {
        #[doc(hidden)]
        pub use tracing::{debug as _debug, trace as _trace};
    } else {
        #[doc(hidden)]
        pub use crate::__tracing_noop__ as _debug;
        #[doc(hidden)]
        pub use crate::__tracing_noop__ as _trace;
    }
}

#[macro_export]
#[doc(hidden)]
macro_rules! __tracing_noop__ {
    ($($fmt:tt)*) => {};
}
