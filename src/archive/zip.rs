//! Loads a `.zhfst` dictionary bundle: a zip archive containing `index.xml` metadata
//! plus an acceptor and an error-model transducer, each named by the metadata (spec
//! section 6.2). Grounded in the teacher's `archive/zip.rs`, simplified by reading each
//! member straight into a `Vec<u8>` rather than juggling a second file handle and a
//! scratch directory for compressed members: `SharedBuffer` already covers the
//! mmap-or-owned-bytes seam at the table layer, so the archive loader doesn't need its
//! own memory-mapping scheme.
use std::fs::File;
use std::io::{BufReader, Read};
use std::sync::Arc;

use ::zip::ZipArchive;

use crate::archive::meta::SpellerMetadata;
use crate::error::ArchiveError;
use crate::speller::Speller;
use crate::transducer::buffer::SharedBuffer;
use crate::transducer::hfst::HfstTransducer;
use crate::transducer::load_transducer;

pub struct ZipSpellerArchive {
    metadata: SpellerMetadata,
    speller: Arc<Speller<HfstTransducer, HfstTransducer>>,
}

fn read_member<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Vec<u8>, ArchiveError> {
    let mut member = archive.by_name(name).map_err(ArchiveError::Zip)?;
    let mut bytes = Vec::with_capacity(member.size() as usize);
    member.read_to_end(&mut bytes).map_err(ArchiveError::Extract)?;
    Ok(bytes)
}

impl ZipSpellerArchive {
    pub fn open(file_path: &str) -> Result<ZipSpellerArchive, ArchiveError> {
        let file = File::open(file_path).map_err(ArchiveError::OpenFile)?;
        let mut archive = ZipArchive::new(BufReader::new(file)).map_err(ArchiveError::Zip)?;

        let index_bytes = read_member(&mut archive, "index.xml")?;
        let metadata = SpellerMetadata::from_bytes(&index_bytes)?;

        let acceptor_bytes = read_member(&mut archive, &metadata.acceptor.id)?;
        let errmodel_bytes = read_member(&mut archive, &metadata.errmodel.id)?;

        let acceptor = load_transducer(Arc::new(acceptor_bytes) as SharedBuffer)?;
        let errmodel = load_transducer(Arc::new(errmodel_bytes) as SharedBuffer)?;

        let speller = Speller::new(errmodel, acceptor);

        Ok(ZipSpellerArchive { metadata, speller })
    }

    pub fn speller(&self) -> Arc<Speller<HfstTransducer, HfstTransducer>> {
        self.speller.clone()
    }

    pub fn metadata(&self) -> &SpellerMetadata {
        &self.metadata
    }

    pub fn mutator(&self) -> &HfstTransducer {
        self.speller.mutator()
    }

    pub fn lexicon(&self) -> &HfstTransducer {
        self.speller.lexicon()
    }
}
