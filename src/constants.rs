//! Column names, node type tags, edge labels and datasource tags shared by
//! the builders.

// input table columns
pub const IDENTIFIER_COL: &str = "identifier";
pub const IDENTIFIER_SOURCE_COL: &str = "identifier.source";
pub const TARGET_COL: &str = "target";
pub const TARGET_SOURCE_COL: &str = "target.source";
pub const DEA_SUFFIX: &str = "_dea";

// annotation columns
pub const BGEE_COL: &str = "Bgee";
pub const DISGENET_COL: &str = "DISGENET_diseases";
pub const LITERATURE_DISEASE_COL: &str = "literature_based_info";
pub const MINERVA_COL: &str = "MINERVA";
pub const WIKIPATHWAYS_COL: &str = "WikiPathways";
pub const KEGG_PATHWAY_COL: &str = "KEGG_pathways";
pub const KEGG_COMPOUND_COL: &str = "KEGG_compounds";
pub const OPENTARGETS_REACTOME_COL: &str = "OpenTargets_reactome";
pub const OPENTARGETS_GO_COL: &str = "OpenTargets_go";
pub const OPENTARGETS_GENE_COMPOUND_COL: &str = "OpenTargets_gene_compounds";
pub const OPENTARGETS_DISEASE_COMPOUND_COL: &str = "OpenTargets_disease_compounds";
pub const MOLMEDB_PROTEIN_COMPOUND_COL: &str = "MolMeDB_transporter_inhibitor";
pub const MOLMEDB_COMPOUND_PROTEIN_COL: &str = "MolMeDB_transporter_inhibited";
pub const PUBCHEM_ASSAYS_COL: &str = "PubChem_assays";
pub const WIKIPATHWAYS_MOLECULAR_COL: &str = "WikiPathways_molecular";
pub const ENSEMBL_HOMOLOG_COL: &str = "Ensembl_homologs";
pub const INTACT_INTERACT_COL: &str = "IntAct_interactions";
pub const INTACT_COMPOUND_INTERACT_COL: &str = "IntAct_compound_interactions";
pub const STRING_INTERACT_COL: &str = "StringDB_ppi";
pub const AOPWIKI_GENE_COL: &str = "aopwiki_gene";

// identifier namespaces
pub const ENSEMBL: &str = "Ensembl";
pub const PUBCHEM_COMPOUND: &str = "PubChem Compound";
pub const CHEBI_PREFIX: &str = "CHEBI:";
pub const SYNTHETIC_ID_PREFIX: &str = "BDF";
pub const NAN: &str = "nan";

// common attribute keys
pub const ID: &str = "id";
pub const NAME: &str = "name";
pub const DATASOURCE: &str = "datasource";
pub const LABEL: &str = "labels";
pub const EDGE_LABEL: &str = "label";
pub const EDGE_HASH: &str = "edge_hash";
pub const UNKNOWN_LABEL: &str = "Unknown";
pub const PIPE: &str = "|";

// datasource tags
pub const BRIDGEDB: &str = "BridgeDb";
pub const BGEE: &str = "Bgee";
pub const DISGENET: &str = "DISGENET";
pub const MINERVA: &str = "MINERVA";
pub const WIKIPATHWAYS: &str = "WikiPathways";
pub const KEGG: &str = "KEGG";
pub const OPENTARGETS: &str = "OpenTargets";
pub const MOLMEDB: &str = "MolMeDB";
pub const PUBCHEM: &str = "PubChem";
pub const STRING: &str = "StringDB";
pub const INTACT: &str = "IntAct";
pub const AOPWIKI: &str = "AOPWIKIRDF";

// node type tags
pub const GENE_NODE_LABEL: &str = "Gene";
pub const COMPOUND_NODE_LABEL: &str = "Compound";
pub const DISEASE_NODE_LABEL: &str = "Disease";
pub const PATHWAY_NODE_LABEL: &str = "Pathway";
pub const ANATOMICAL_NODE_LABEL: &str = "Anatomical Entity";
pub const GO_BP_NODE_LABEL: &str = "Biological Process";
pub const GO_MF_NODE_LABEL: &str = "Molecular Function";
pub const GO_CC_NODE_LABEL: &str = "Cellular Component";
pub const SIDE_EFFECT_NODE_LABEL: &str = "Side Effect";
pub const HOMOLOG_NODE_LABEL: &str = "Homolog";
pub const MOLECULAR_ENTITY_NODE_LABEL: &str = "Molecular Entity";
pub const AOP_NODE_LABEL: &str = "AOP";
pub const MIE_NODE_LABEL: &str = "Molecular Initiating Event";
pub const KEY_EVENT_NODE_LABEL: &str = "Key Event";
pub const AO_NODE_LABEL: &str = "Adverse Outcome";

// edge labels
pub const GENE_ANATOMICAL_EDGE_LABEL: &str = "expressed_in";
pub const GENE_DISEASE_EDGE_LABEL: &str = "associated_with";
pub const GENE_PATHWAY_EDGE_LABEL: &str = "part_of";
pub const GENE_GO_EDGE_LABEL: &str = "part_of";
pub const SIDE_EFFECT_EDGE_LABEL: &str = "has_side_effect";
pub const INHIBITS_EDGE_LABEL: &str = "inhibits";
pub const PPI_EDGE_LABEL: &str = "interacts_with";
pub const HOMOLOG_EDGE_LABEL: &str = "is_homolog_of";
pub const KEGG_COMPOUND_EDGE_LABEL: &str = "has_compound";
pub const COMPOUND_PPI_EDGE_LABEL: &str = "compound-ppi";
pub const AOP_GENE_EDGE_LABEL: &str = "part_of_aop";
pub const MIE_AOP_EDGE_LABEL: &str = "initiates";
pub const KE_UPSTREAM_MIE_EDGE_LABEL: &str = "triggered_by";
pub const KE_DOWNSTREAM_KE_EDGE_LABEL: &str = "leads_to";
pub const AO_KE_EDGE_LABEL: &str = "associated_with";
pub const DEFAULT_INTERACTION_TYPE: &str = "Interaction";
