//! pdfTeX images, auxiliary memory and object table.

use std::io::Read;

use fmtscope_arena::Table;
use fmtscope_core::layout::{
    IMAGE_TYPE_JBIG2, IMAGE_TYPE_JPG, IMAGE_TYPE_PDF, IMAGE_TYPE_PNG, INF_OBJ_TAB_SIZE,
    OBJ_TYPE_OBJ, OBJ_TYPE_XFORM, OBJ_TYPE_XIMAGE, SUP_OBJ_TAB_SIZE, SUP_PDF_MEM_SIZE,
};

use super::{count, ensure};
use crate::error::LoadError;
use crate::state::{EngineState, ImageMeta};
use crate::stream::DumpReader;

pub(crate) fn read<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    read_images(r, state)?;
    read_pdf_mem(r, state)?;
    read_objects(r, state)
}

/// Read one integer and report it under `label`.
fn field<R: Read>(r: &mut DumpReader<'_, R>, label: &str) -> Result<i32, LoadError> {
    let x = r.read_i32()?;
    r.inform(label, x);
    r.hexdump_int(label, x);
    Ok(x)
}

fn read_images<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    let pdf = &mut state.pdf;
    pdf.image_limit = field(r, "'image_limit' value")?;
    pdf.cur_image = field(r, "'cur_image' value")?;
    pdf.images.clear();

    for img in 0..pdf.cur_image {
        let len = r.read_i32()?;
        ensure(len >= 0, || format!("Image {img}: name length ({len}) < 0."))?;
        r.hexdump_int(&format!("Image {img} name length"), len);
        let raw = r.read_bytes(count(len))?;
        r.hexdump(&format!("Image {img} name"), &raw);
        let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        let name = raw[..end].to_vec();
        r.inform(
            &format!("image {img} name"),
            String::from_utf8_lossy(&name),
        );

        let mut meta = ImageMeta {
            name,
            image_type: field(r, &format!("image {img} type"))?,
            color_type: field(r, &format!("image {img} color type"))?,
            width: field(r, &format!("image {img} width"))?,
            height: field(r, &format!("image {img} height"))?,
            x_res: field(r, &format!("image {img} x-res"))?,
            y_res: field(r, &format!("image {img} y-res"))?,
            num_pages: field(r, &format!("image {img} number of pages"))?,
            colorspace_ref: field(r, &format!("image {img} color space reference"))?,
            group_ref: field(r, &format!("image {img} group reference"))?,
            page_box: None,
            selected_page: None,
        };
        match meta.image_type {
            IMAGE_TYPE_PDF => {
                meta.page_box = Some(field(r, &format!("(PDF) image {img} page box"))?);
                meta.selected_page =
                    Some(field(r, &format!("(PDF) image {img} selected page"))?);
            }
            IMAGE_TYPE_PNG | IMAGE_TYPE_JPG => {}
            IMAGE_TYPE_JBIG2 => {
                meta.selected_page =
                    Some(field(r, &format!("(JBIG2) image {img} selected page"))?);
            }
            other => {
                return Err(LoadError::format(format!(
                    "Image {img}: Unsupported image type {other}."
                )));
            }
        }
        pdf.images.push(meta);
    }
    Ok(())
}

fn read_pdf_mem<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    let pdf = &mut state.pdf;

    pdf.pdf_mem_size = field(r, "'pdf_mem_size' value")?;
    let size = pdf.pdf_mem_size;
    ensure((0..=SUP_PDF_MEM_SIZE).contains(&size), || {
        format!("'pdf_mem_size' ({size}) is not in [0, {SUP_PDF_MEM_SIZE}].")
    })?;
    pdf.pdf_mem = Table::alloc("pdf_mem", count(size));

    pdf.pdf_mem_ptr = field(r, "'pdf_mem_ptr' value")?;
    let ptr = pdf.pdf_mem_ptr;
    ensure(ptr <= size + 1, || {
        format!("'pdf_mem_ptr' ({ptr}) > 'pdf_mem_size' + 1 ({}).", size + 1)
    })?;
    for k in 1..ptr {
        let x = field(r, &format!("'pdf_mem[{k}]' value"))?;
        pdf.pdf_mem.set(i64::from(k), x)?;
    }
    r.memstats(&pdf.pdf_mem);
    Ok(())
}

fn read_objects<R: Read>(
    r: &mut DumpReader<'_, R>,
    state: &mut EngineState,
) -> Result<(), LoadError> {
    let pdf = &mut state.pdf;

    pdf.obj_tab_size = field(r, "'obj_tab_size' value")?;
    pdf.obj_ptr = field(r, "'obj_ptr' value")?;
    pdf.sys_obj_ptr = field(r, "'sys_obj_ptr' value")?;

    let rows = pdf.obj_tab_size.clamp(INF_OBJ_TAB_SIZE, SUP_OBJ_TAB_SIZE);
    let sys = pdf.sys_obj_ptr;
    ensure((0..=rows).contains(&sys), || {
        format!("'sys_obj_ptr' ({sys}) is not in [0, {rows}].")
    })?;
    pdf.obj_tab = Table::alloc("obj_tab", count(rows));
    for k in 1..=sys {
        let mut row = [0; 5];
        for (slot, value) in row.iter_mut().enumerate() {
            if slot == 2 {
                *value = -1;
                continue;
            }
            *value = r.read_i32()?;
            r.hexdump_int(&format!("'obj_tab[{k}].int{slot}' value"), *value);
        }
        for (slot, value) in (0u8..).zip(row) {
            pdf.obj_tab.at_mut(i64::from(k)).int(slot).set(value)?;
        }
    }
    r.memstats(&pdf.obj_tab);

    pdf.obj_count = field(r, "'pdf_obj_count' value")?;
    pdf.xform_count = field(r, "'pdf_xform_count' value")?;
    pdf.ximage_count = field(r, "'pdf_ximage_count' value")?;
    for (kind, name) in [
        (OBJ_TYPE_OBJ, "OBJ_TYPE_OBJ"),
        (OBJ_TYPE_XFORM, "OBJ_TYPE_XFORM"),
        (OBJ_TYPE_XIMAGE, "OBJ_TYPE_XIMAGE"),
    ] {
        let x = field(r, &format!("'head_tab[{name}]' value"))?;
        pdf.head_tab.set(i64::from(kind), x)?;
    }
    r.memstats(&pdf.head_tab);

    pdf.last_obj = field(r, "'pdf_last_obj' value")?;
    pdf.last_xform = field(r, "'pdf_last_xform' value")?;
    pdf.last_ximage = field(r, "'pdf_last_ximage' value")?;
    Ok(())
}
