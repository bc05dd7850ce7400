//! The string pool.

use std::io::Read;

use fmtscope_core::config::{SUP_MAX_STRINGS, SUP_POOL_SIZE};
use tracing::warn;

use super::{count, ensure};
use crate::error::LoadError;
use crate::state::EngineState;
use crate::stream::DumpReader;

pub(crate) fn read<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    let pool = &mut state.strings;

    let x = r.read_i32()?;
    ensure(x >= 0, || format!("pool_ptr < 0 ({x})."))?;
    let needed = i64::from(x) + i64::from(pool.pool_free);
    ensure(needed <= i64::from(SUP_POOL_SIZE), || {
        format!(
            "String pool size 'SUP_POOL_SIZE' is too small ({SUP_POOL_SIZE}). \
             'SUP_POOL_SIZE' should be at least {needed}."
        )
    })?;
    pool.pool_ptr = x;
    r.derived("'pool_free'", pool.pool_free);
    r.report_value("'pool_ptr'", x);
    pool.pool_size = pool.pool_size.max(pool.pool_ptr + pool.pool_free);
    r.derived("'pool_size'", pool.pool_size);

    let x = r.read_i32()?;
    ensure(x >= 0, || format!("str_ptr < 0 ({x})."))?;
    let needed = i64::from(x) + i64::from(pool.strings_free);
    ensure(needed <= i64::from(SUP_MAX_STRINGS), || {
        format!(
            "Maximal number of strings 'SUP_MAX_STRINGS' is too small ({SUP_MAX_STRINGS}). \
             'SUP_MAX_STRINGS' should be at least {needed}."
        )
    })?;
    pool.str_ptr = x;
    r.derived("'strings_free'", pool.strings_free);
    r.report_value("'str_ptr'", x);
    pool.max_strings = pool.max_strings.max(pool.str_ptr + pool.strings_free);
    r.derived("'max_strings'", pool.max_strings);

    pool.allocate();
    let mut previous = 0;
    for i in 0..=pool.str_ptr {
        let x = r.read_i32()?;
        ensure((0..=pool.pool_ptr).contains(&x), || {
            format!("'str_start[{i}]' ({x}) not in [0, {}].", pool.pool_ptr)
        })?;
        ensure(x >= previous, || {
            format!("'str_start[{i}]' ({x}) < 'str_start[{}]' ({previous}).", i - 1)
        })?;
        pool.start.set(i64::from(i), x)?;
        previous = x;
    }
    r.memstats(&pool.start);
    r.hexdump_range("'str_start' array", &pool.start, 0, count(pool.str_ptr + 1))?;

    r.read_into(&mut pool.pool, 0, count(pool.pool_ptr))?;
    r.memstats(&pool.pool);
    r.hexdump_range("'str_pool' array", &pool.pool, 0, count(pool.pool_ptr))?;

    pool.init_str_ptr = pool.str_ptr;
    r.derived("'init_str_ptr'", pool.init_str_ptr);
    pool.init_pool_ptr = pool.pool_ptr;
    r.derived("'init_pool_ptr'", pool.init_pool_ptr);

    for dup in pool.build_index()? {
        let text = String::from_utf8_lossy(&dup.bytes).into_owned();
        warn!(id = dup.id, offset = dup.offset, text = %text, "duplicate pool string");
        r.inform(
            &format!(
                "warning: Duplicate string at {} ({:x}) in 'str_pool' array",
                dup.id, dup.offset
            ),
            format!("{text:?}"),
        );
    }
    Ok(())
}
